//! Driver-bank allocation for pinmap.
//!
//! This crate provides:
//! - [`BankAllocator`] - Packs coil and lamp banks onto hardware driver groups
//! - [`Allocation`] - The immutable result of one allocation pass
//! - [`ResolvedTable`] - Item name to physical number, hardware or emulated
//! - [`GroupConfig`], [`GlobalConfig`], [`DriverState`] - Bring-up records
//! - [`DriverTransport`] - The seam to the board (real or simulated)
//! - [`SharedAllocation`] - Whole-snapshot swapping for live reconfiguration
//! - [`MachineDescription`] - The input: generation, items, aliases, globals

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod config;
pub mod records;
pub mod registry;
pub mod shared;
pub mod slot;
pub mod table;
pub mod transport;

pub use allocator::{Allocation, AllocationNotice, BankAllocator, UnresolvedReason};
pub use config::{AliasEntry, AliasKind, AllocatorConfig, DriverGlobals, EntityDecl, MachineDescription};
pub use records::{DriverState, GlobalConfig, GroupConfig};
pub use registry::{BoardRegistry, BoardUsage};
pub use shared::SharedAllocation;
pub use slot::{EmulatedBank, LampBank, Slot, SlotTable};
pub use table::{Resolution, ResolvedEntity, ResolvedTable};
pub use transport::{DriverTransport, RecordingTransport, TransportCall};
