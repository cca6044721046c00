//! Shared, swappable allocation snapshots.
//!
//! Readers take an `Arc` to the current allocation and keep using it for as
//! long as they like. Reconfiguration builds a complete new allocation and
//! replaces the shared reference in one step.

use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::allocator::{Allocation, BankAllocator};
use crate::config::MachineDescription;

/// The current allocation of a running machine.
#[derive(Debug)]
pub struct SharedAllocation {
    current: RwLock<Arc<Allocation>>,
}

impl SharedAllocation {
    /// Wraps an initial allocation.
    #[must_use]
    pub fn new(allocation: Allocation) -> Self {
        Self {
            current: RwLock::new(Arc::new(allocation)),
        }
    }

    /// The current allocation.
    #[must_use]
    pub fn load(&self) -> Arc<Allocation> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Replaces the current allocation and returns the previous one.
    pub fn store(&self, allocation: Allocation) -> Arc<Allocation> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(allocation))
    }

    /// Runs a fresh allocation pass and, if it succeeds, makes it current.
    ///
    /// On failure the current allocation is left in place.
    ///
    /// # Errors
    ///
    /// Any [`AllocationError`](pinmap_foundation::AllocationError) from the
    /// pass, lifted into [`pinmap_foundation::Error`] with the offending item
    /// as context.
    pub fn reallocate(
        &self,
        allocator: &BankAllocator,
        description: &MachineDescription,
    ) -> pinmap_foundation::Result<Arc<Allocation>> {
        let allocation = allocator.allocate(description)?;
        info!("reallocated {} items", allocation.table().len());
        Ok(self.store(allocation))
    }
}
