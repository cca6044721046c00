//! Integration tests for the generation decoders

use pinmap_address::decode;
use pinmap_foundation::{DecodeError, MachineGeneration};

use MachineGeneration::{Custom, Pdb, SternSam, SternWhitestar, Wpc, Wpc95, WpcAlphanumeric};

// =============================================================================
// WPC
// =============================================================================

#[test]
fn wpc_flipper_coils() {
    assert_eq!(decode(Wpc, "FLRM"), Ok(32));
    assert_eq!(decode(Wpc, "FULH"), Ok(39));
    assert_eq!(decode(Wpc, "FURH"), Ok(37));
}

#[test]
fn wpc_flipper_winding_defaults_to_hold() {
    assert_eq!(decode(Wpc, "FLRX"), Ok(33));
    assert_eq!(decode(WpcAlphanumeric, "FULQ"), Ok(39));
}

#[test]
fn wpc_coil_bands() {
    assert_eq!(decode(Wpc, "C01"), Ok(40));
    assert_eq!(decode(Wpc, "C30"), Ok(33));
    assert_eq!(decode(Wpc, "C40"), Ok(147));
    assert_eq!(decode(Wpc95, "C40"), Ok(71));
    assert_eq!(decode(WpcAlphanumeric, "C40"), Ok(147));
}

#[test]
fn wpc_matrix_and_dedicated_switches() {
    assert_eq!(decode(Wpc, "S12"), Ok(33));
    assert_eq!(decode(Wpc, "S31"), Ok(64));
    assert_eq!(decode(Wpc, "SD3"), Ok(10));
    assert_eq!(decode(Wpc, "SF4"), Ok(3));
}

#[test]
fn wpc_lamps_and_gi() {
    assert_eq!(decode(Wpc, "L12"), Ok(81));
    assert_eq!(decode(Wpc, "L31"), Ok(96));
    assert_eq!(decode(Wpc, "G02"), Ok(73));
}

// =============================================================================
// Stern
// =============================================================================

#[test]
fn stern_coils() {
    assert_eq!(decode(SternSam, "C10"), Ok(41));
    assert_eq!(decode(SternWhitestar, "C10"), Ok(41));
}

#[test]
fn stern_lamps_are_column_major() {
    assert_eq!(decode(SternSam, "L01"), Ok(192));
    assert_eq!(decode(SternSam, "L02"), Ok(176));
    assert_eq!(decode(SternSam, "L09"), Ok(193));
}

#[test]
fn stern_switch_matrix_differs_by_generation() {
    assert_eq!(decode(SternSam, "S09"), Ok(40));
    assert_eq!(decode(SternWhitestar, "S09"), Ok(55));
    assert_eq!(decode(SternSam, "S01"), decode(SternWhitestar, "S01"));
}

// =============================================================================
// Fallbacks and Errors
// =============================================================================

#[test]
fn numeric_codes_pass_through() {
    for generation in MachineGeneration::ALL {
        assert_eq!(decode(generation, "17"), Ok(17), "{generation}");
    }
}

#[test]
fn bus_machines_do_not_decode_letters() {
    assert!(decode(Pdb, "C01").is_err());
    assert!(decode(Custom, "L11").is_err());
}

#[test]
fn invalid_codes_report_generation_and_code() {
    let err = decode(Wpc, "Q99").unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidCode {
            generation: Wpc,
            code: "Q99".to_string(),
        }
    );
}

#[test]
fn lamp_zero_does_not_underflow() {
    assert!(decode(Wpc, "L00").is_err());
    assert!(decode(SternSam, "L00").is_err());
}
