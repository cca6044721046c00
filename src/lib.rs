//! Pinmap - pinball position codes to physical driver numbers
//!
//! This crate re-exports all layers of the pinmap system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: pinmap_alloc        Bank allocation, resolved tables, bring-up records
//! Layer 1: pinmap_address      Generation decoders, alias and bus grammar, resolvers
//! Layer 0: pinmap_foundation   Machine generations, hardware constants, Error
//! ```

pub use pinmap_address as address;
pub use pinmap_alloc as alloc;
pub use pinmap_foundation as foundation;
