//! Integration tests for the coil, lamp and switch resolvers

use pinmap_address::{
    AliasRule, BusAddress, CoilAddress, LampAddress, ResolvedAddress, SwitchAddress, SwitchKind,
};
use pinmap_foundation::MachineGeneration::{Pdb, SternSam, Wpc};

// =============================================================================
// Coils
// =============================================================================

#[test]
fn bus_coil() {
    let coil = CoilAddress::resolve(Pdb, "A3-B1-6", &[]);
    assert_eq!(coil.address(), ResolvedAddress::bus(BusAddress::new(3, 1, 6)));
    assert_eq!(coil.bank(), Some(7));
    assert_eq!(coil.output(), Some(6));
}

#[test]
fn dedicated_coil_pins() {
    let coil = CoilAddress::resolve(Pdb, "C12", &[]);
    assert_eq!(coil.address(), ResolvedAddress::Dedicated { output: 12 });
    assert_eq!(coil.bank(), Some(1));
    assert_eq!(coil.dedicated_driver(), Some(11));
}

#[test]
fn aliased_coil() {
    let rules = [AliasRule::exact("trough", "0/0/3")];
    let coil = CoilAddress::resolve(Pdb, "trough", &rules);
    assert_eq!(coil.address(), ResolvedAddress::bus(BusAddress::new(0, 0, 3)));
}

#[test]
fn unknown_coil_codes() {
    assert!(CoilAddress::resolve(Pdb, "???", &[]).address().is_unknown());
    assert!(CoilAddress::resolve(Pdb, "C0", &[]).address().is_unknown());
    assert!(CoilAddress::resolve(Wpc, "Z9", &[]).address().is_unknown());
}

#[test]
fn decoded_coils_have_no_bank() {
    let coil = CoilAddress::resolve(SternSam, "C05", &[]);
    assert_eq!(coil.address(), ResolvedAddress::Dedicated { output: 36 });
    assert_eq!(coil.bank(), None);
    assert_eq!(coil.dedicated_driver(), Some(36));
}

// =============================================================================
// Lamps
// =============================================================================

#[test]
fn matrix_lamp() {
    let lamp = LampAddress::resolve(Pdb, "C-A0-B0-2:R-A1-B0-5", &[]);
    assert_eq!(lamp.source(), Some(BusAddress::new(0, 0, 2)));
    assert_eq!(lamp.sink(), Some(BusAddress::new(1, 0, 5)));
    assert_eq!(lamp.source_bank(), Some(0));
    assert_eq!(lamp.sink_bank(), Some(2));
    assert_eq!(lamp.source_output(), Some(2));
    assert_eq!(lamp.sink_output(), Some(5));
}

#[test]
fn matrix_lamp_halves_are_aliased() {
    let rules = [AliasRule::prefix("col", "A0-B0-"), AliasRule::prefix("row", "A1-B0-")];
    let lamp = LampAddress::resolve(Pdb, "col2:row5", &rules);
    assert_eq!(lamp.source(), Some(BusAddress::new(0, 0, 2)));
    assert_eq!(lamp.sink(), Some(BusAddress::new(1, 0, 5)));
}

#[test]
fn dedicated_and_unknown_lamps() {
    assert_eq!(LampAddress::resolve(Pdb, "L7", &[]).dedicated_output(), Some(7));
    assert!(LampAddress::resolve(Pdb, "A0-B0-2", &[]).address().is_unknown());
    assert!(LampAddress::resolve(Pdb, "A0-B0-2:junk", &[]).address().is_unknown());
}

#[test]
fn decoded_lamp() {
    assert_eq!(LampAddress::resolve(Wpc, "L11", &[]).dedicated_output(), Some(80));
}

// =============================================================================
// Switches
// =============================================================================

#[test]
fn bus_machine_switches() {
    let dedicated = SwitchAddress::resolve(Pdb, "SD6").unwrap();
    assert_eq!(dedicated.kind, SwitchKind::Dedicated);
    assert_eq!(dedicated.index, 13);

    let matrix = SwitchAddress::resolve(Pdb, "2/3").unwrap();
    assert_eq!(matrix.kind, SwitchKind::Matrix);
    assert_eq!(matrix.index, 67);

    let raw = SwitchAddress::resolve(Pdb, "12").unwrap();
    assert_eq!(raw.kind, SwitchKind::Raw);
    assert_eq!(raw.index, 12);
}

#[test]
fn decoded_switch_kinds() {
    assert_eq!(SwitchAddress::resolve(Wpc, "SF2").unwrap().kind, SwitchKind::Dedicated);
    assert_eq!(SwitchAddress::resolve(Wpc, "S11").unwrap().kind, SwitchKind::Matrix);
    assert_eq!(SwitchAddress::resolve(Wpc, "40").unwrap().kind, SwitchKind::Raw);
}

#[test]
fn malformed_switches() {
    assert!(SwitchAddress::resolve(Pdb, "1/2/3").is_err());
    assert!(SwitchAddress::resolve(Pdb, "SD0").is_err());
    assert!(SwitchAddress::resolve(Pdb, "left").is_err());
}
