//! Core types shared by every pinmap layer.
//!
//! This crate provides:
//! - [`MachineGeneration`] - Hardware families with their own position-code encodings
//! - [`Section`] - The three kinds of declared machine items
//! - [`hardware`] - Fixed capacities of the driver board
//! - [`Error`] - Grammar, decode, and allocation errors with entity context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod hardware;
pub mod types;

pub use error::{
    AllocationError, DecodeError, Error, ErrorContext, ErrorKind, GrammarError, Result,
};
pub use types::{MachineGeneration, Section, UnknownGeneration};
