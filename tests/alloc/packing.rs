//! Integration tests for slot packing and overflow

use std::collections::HashSet;

use pinmap_alloc::{
    AllocationNotice, AllocatorConfig, BankAllocator, EmulatedBank, MachineDescription, Resolution,
    Slot,
};
use pinmap_foundation::{AllocationError, MachineGeneration, Section};

fn pdb() -> MachineDescription {
    MachineDescription::new(MachineGeneration::Pdb)
}

/// Coils on `count` distinct banks, one coil per bank on output 2.
fn coil_banks(count: u8) -> MachineDescription {
    (0..count).fold(pdb(), |d, flat| {
        d.with_coil(format!("coil{flat}"), format!("A{}-B{}-2", flat / 2, flat % 2))
    })
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn dedicated_then_lamps_then_coils() {
    let allocation = BankAllocator::default()
        .allocate(
            &pdb()
                .with_coil("kicker", "A0-B0-3")
                .with_lamp("shoot_again", "A0-B0-1:A0-B1-5"),
        )
        .unwrap();
    let slots = allocation.slots();

    assert_eq!(slots.get(0), Some(Slot::Dedicated { enabled: true }));
    assert!(matches!(slots.get(4), Some(Slot::Lamp(_))));
    assert_eq!(slots.get(5), Some(Slot::Coil { bank: 0 }));
    assert!(slots.slots()[6..].iter().all(|s| *s == Slot::Disabled));

    let table = allocation.table();
    let lamp = table.get(Section::Lamp, "shoot_again").unwrap();
    let coil = table.get(Section::Coil, "kicker").unwrap();
    assert_eq!(lamp.resolution, Resolution::Hardware(37));
    assert_eq!(coil.resolution, Resolution::Hardware(43));
}

#[test]
fn first_seen_bank_order_is_kept() {
    let allocation = BankAllocator::default()
        .allocate(
            &pdb()
                .with_coil("a", "A5-B1-0")
                .with_coil("b", "A1-B0-0")
                .with_coil("c", "A5-B1-7"),
        )
        .unwrap();

    assert_eq!(allocation.slots().get(4), Some(Slot::Coil { bank: 11 }));
    assert_eq!(allocation.slots().get(5), Some(Slot::Coil { bank: 2 }));
    assert_eq!(allocation.table().number(Section::Coil, "c"), Some(39));
}

// =============================================================================
// Overflow
// =============================================================================

#[test]
fn thirty_banks_overflow_capacity() {
    let allocator = BankAllocator::new(AllocatorConfig::default().with_max_bank_index(u8::MAX));
    let allocation = allocator.allocate(&coil_banks(30)).unwrap();

    let emulated: Vec<u16> = allocation.table().emulated_numbers().into_iter().collect();
    assert_eq!(emulated, vec![210, 218, 226, 234, 242, 250, 258, 266]);
    assert_eq!(allocation.slots().emulated().len(), 8);
    assert_eq!(
        allocation.slots().emulated()[0],
        EmulatedBank::Coil { bank: 22 }
    );

    let numbers: HashSet<u16> = allocation
        .table()
        .iter()
        .filter_map(|e| e.resolution.number())
        .collect();
    assert_eq!(numbers.len(), 30);
}

#[test]
fn banks_past_index_bound_are_emulated() {
    let allocation = BankAllocator::default().allocate(&coil_banks(30)).unwrap();
    let downgraded: Vec<u8> = allocation
        .notices()
        .iter()
        .filter_map(|n| match n {
            AllocationNotice::DowngradedCoilBank { bank, .. } => Some(*bank),
            _ => None,
        })
        .collect();

    assert_eq!(downgraded, (16..30).collect::<Vec<u8>>());
    assert_eq!(allocation.table().number(Section::Coil, "coil15"), Some(19 * 8 + 2));
    assert!(
        allocation
            .table()
            .get(Section::Coil, "coil16")
            .unwrap()
            .resolution
            .is_emulated()
    );
}

#[test]
fn reallocating_gives_the_same_numbers() {
    let description = coil_banks(30);
    let first = BankAllocator::default().allocate(&description).unwrap();
    let second = BankAllocator::default().allocate(&description).unwrap();

    for entry in first.table().iter() {
        assert_eq!(
            second.table().number(entry.section, &entry.name),
            entry.resolution.number()
        );
    }
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn third_source_bank_is_rejected() {
    let err = BankAllocator::default()
        .allocate(
            &pdb()
                .with_lamp("a", "A0-B0-0:A2-B0-0")
                .with_lamp("b", "A1-B0-0:A2-B0-0")
                .with_lamp("c", "A1-B1-0:A2-B0-0"),
        )
        .unwrap_err();

    assert_eq!(err, AllocationError::TooManySourceBanks { banks: vec![0, 2, 3] });
}

#[test]
fn unresolved_items_do_not_stop_allocation() {
    let allocation = BankAllocator::default()
        .allocate(
            &pdb()
                .with_coil("mystery", "???")
                .with_coil("kicker", "A0-B0-1")
                .with_lamp("odd", "L"),
        )
        .unwrap();

    assert_eq!(allocation.table().len(), 3);
    assert_eq!(allocation.table().unresolved().count(), 2);
    assert_eq!(allocation.table().number(Section::Coil, "kicker"), Some(33));
}
