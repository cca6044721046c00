//! Position-code grammar and address resolution for pinmap.
//!
//! Turns the human-authored position code of a coil, lamp, or switch into a
//! typed hardware address.
//!
//! # Pipeline
//!
//! ```text
//! "trough_eject"              (declared code)
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ALIAS RULES     │  → "A1-B0-3"
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ BUS GRAMMAR  /  │  → Bus { board: 1, bank: 0, output: 3 }
//! │ GENERATION      │     or Dedicated { output } via the decoder
//! │ DECODER         │
//! └─────────────────┘
//!          │
//!          ▼
//!   ResolvedAddress  (Dedicated | Bus | BusLamp | Switch | Unknown)
//! ```
//!
//! # Modules
//!
//! - [`alias`] - Ordered pattern/replacement rules applied before parsing
//! - [`grammar`] - Bus (`A0-B1-2`, `0/1/2`) and lamp matrix (`src:sink`) grammar
//! - [`decoder`] - Per-generation closed-form decoding of short codes
//! - [`address`] - The [`ResolvedAddress`] sum type
//! - [`coil`], [`lamp`], [`switch`] - Per-section resolvers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod address;
pub mod alias;
pub mod coil;
pub mod decoder;
pub mod grammar;
pub mod lamp;
pub mod switch;

pub use address::{ResolvedAddress, SwitchKind};
pub use alias::{AliasRule, resolve_alias};
pub use coil::CoilAddress;
pub use decoder::decode;
pub use grammar::{
    BusAddress, decode_bus_address, decode_matrix_half, is_bus_address, split_matrix,
};
pub use lamp::LampAddress;
pub use switch::SwitchAddress;
