//! Integration tests for Layer 1: Address
//!
//! Tests for generation decoders, alias and bus grammar, and the coil, lamp
//! and switch resolvers.

mod decoding;
mod grammar;
mod resolvers;
