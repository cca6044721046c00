//! Integration tests for allocation snapshots and lookup

use std::sync::Arc;
use std::thread;

use pinmap_alloc::{AliasEntry, AliasKind, BankAllocator, MachineDescription, SharedAllocation};
use pinmap_foundation::{MachineGeneration, Section};

fn machine(kicker: &str) -> MachineDescription {
    MachineDescription::new(MachineGeneration::Pdb)
        .with_alias(AliasEntry::new("kicker_pos", kicker).with_kind(AliasKind::Exact))
        .with_coil("kicker", "kicker_pos")
}

#[test]
fn lookup_uses_allocation_aliases() {
    let allocation = BankAllocator::default().allocate(&machine("A1-B1-6")).unwrap();

    assert_eq!(allocation.table().number(Section::Coil, "kicker"), Some(38));
    assert_eq!(allocation.lookup(Section::Coil, "kicker_pos"), Some(38));
    assert_eq!(allocation.lookup(Section::Coil, "A1-B1-0"), Some(32));
    assert_eq!(allocation.lookup(Section::Lamp, "A0-B0-0:A0-B0-1"), None);
}

#[test]
fn swap_is_atomic_for_readers() {
    let shared = Arc::new(SharedAllocation::new(
        BankAllocator::default().allocate(&machine("A0-B0-1")).unwrap(),
    ));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..100 {
                    let snapshot = shared.load();
                    let number = snapshot.table().number(Section::Coil, "kicker");
                    let slot = snapshot.slots().get(4);
                    // A reader never sees the new table with the old slots.
                    assert!(matches!(
                        (number, slot),
                        (Some(33), Some(pinmap_alloc::Slot::Coil { bank: 0 | 9 }))
                    ));
                }
            })
        })
        .collect();

    shared.store(BankAllocator::default().allocate(&machine("A4-B1-1")).unwrap());
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(shared.load().slots().get(4), Some(pinmap_alloc::Slot::Coil { bank: 9 }));
}
