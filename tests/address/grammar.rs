//! Integration tests for alias rewriting and the bus grammar

use pinmap_address::grammar::parse_bus_address;
use pinmap_address::{
    AliasRule, BusAddress, decode_bus_address, decode_matrix_half, is_bus_address, resolve_alias,
    split_matrix,
};
use pinmap_foundation::GrammarError;
use proptest::prelude::*;

// =============================================================================
// Alias Rules
// =============================================================================

#[test]
fn rules_apply_in_order() {
    let rules = [
        AliasRule::exact("trough", "board1-0-3"),
        AliasRule::prefix("board", "A"),
        AliasRule::substring("-0-", "-B0-"),
    ];
    assert_eq!(resolve_alias("trough", &rules), "A1-B0-3");
}

#[test]
fn later_rules_see_earlier_output() {
    let rules = [AliasRule::substring("x", "y"), AliasRule::substring("y", "z")];
    assert_eq!(resolve_alias("x", &rules), "z");
}

#[test]
fn custom_rules_take_closures() {
    let rule = AliasRule::new(
        "upper",
        |code| code.starts_with('a'),
        |code| code.to_ascii_uppercase(),
    );
    assert_eq!(rule.pattern(), "upper");
    assert_eq!(resolve_alias("a0-b1-2", &[rule]), "A0-B1-2");
}

#[test]
fn empty_pattern_never_matches() {
    let rule = AliasRule::substring("", "X");
    assert!(!rule.matches("A0-B0-1"));
    assert_eq!(rule.apply("A0-B0-1"), "A0-B0-1");
}

// =============================================================================
// Bus Addresses
// =============================================================================

#[test]
fn tagged_and_slashed_forms_agree() {
    assert_eq!(parse_bus_address("A3-B1-6"), parse_bus_address("3/1/6"));
    assert_eq!(parse_bus_address("a3-b1-6").unwrap(), BusAddress::new(3, 1, 6));
}

#[test]
fn flat_bank_id() {
    assert_eq!(BusAddress::new(0, 0, 0).bank_id(), 0);
    assert_eq!(BusAddress::new(3, 1, 6).bank_id(), 7);
}

#[test]
fn malformed_bus_addresses() {
    assert!(matches!(
        parse_bus_address("A0-B1"),
        Err(GrammarError::NotBusAddress { .. })
    ));
    assert!(matches!(
        parse_bus_address("X0-B1-2"),
        Err(GrammarError::NotBusAddress { .. })
    ));
    assert!(matches!(
        parse_bus_address("A0-Bx-2"),
        Err(GrammarError::BadComponent { .. })
    ));
    assert!(matches!(
        parse_bus_address("C07"),
        Err(GrammarError::NotBusAddress { .. })
    ));
}

#[test]
fn every_address_owns_its_flat_bank() {
    // A0-B2 would alias A1-B0, and A128-B0 would wrap onto A0-B0.
    assert!(matches!(
        parse_bus_address("A0-B2-3"),
        Err(GrammarError::OutOfRange { component: "bank", value: 2, .. })
    ));
    assert!(matches!(
        parse_bus_address("128/0/3"),
        Err(GrammarError::OutOfRange { component: "board", value: 128, .. })
    ));
    assert_eq!(parse_bus_address("A1-B0-3").unwrap().bank_id(), 2);
}

#[test]
fn aliases_run_before_parsing() {
    let rules = [AliasRule::exact("popper", "A2-B0-4")];
    assert_eq!(decode_bus_address("popper", &rules), Ok(BusAddress::new(2, 0, 4)));
    assert!(is_bus_address("popper", &rules));
    assert!(!is_bus_address("popper", &[]));
}

// =============================================================================
// Lamp Matrix Halves
// =============================================================================

#[test]
fn matrix_roles_are_stripped_when_decoding() {
    let (source, sink) = split_matrix("C-A0-B0-2:R-A1-B0-5").unwrap();
    assert_eq!(decode_matrix_half(&source, &[]), Ok(BusAddress::new(0, 0, 2)));
    assert_eq!(decode_matrix_half(&sink, &[]), Ok(BusAddress::new(1, 0, 5)));
}

#[test]
fn matrix_halves_are_aliased_before_roles() {
    let rules = [
        AliasRule::exact("col-2", "A0-B0-2"),
        AliasRule::exact("row-5", "A1-B0-5"),
    ];
    let (source, sink) = split_matrix("col-2:row-5").unwrap();
    assert_eq!(source, "col-2");
    assert_eq!(decode_matrix_half(&source, &rules), Ok(BusAddress::new(0, 0, 2)));
    assert_eq!(decode_matrix_half(&sink, &rules), Ok(BusAddress::new(1, 0, 5)));
}

#[test]
fn matrix_without_roles_is_kept() {
    let (source, sink) = split_matrix("0/1/2:1/0/5").unwrap();
    assert_eq!(source, "0/1/2");
    assert_eq!(sink, "1/0/5");
}

#[test]
fn matrix_needs_two_halves() {
    assert_eq!(
        split_matrix("A0-B0-2"),
        Err(GrammarError::NotMatrix {
            code: "A0-B0-2".to_string(),
            parts: 1,
        })
    );
    assert!(split_matrix("a:b:c").is_err());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prefix_alias_is_idempotent(board in 0u8..16, bank in 0u8..2, output in 0u8..8) {
        let rules = [AliasRule::prefix("board", "A")];
        let code = format!("board{board}-B{bank}-{output}");
        let once = resolve_alias(&code, &rules);
        prop_assert_eq!(resolve_alias(&once, &rules), once.clone());
        prop_assert_eq!(parse_bus_address(&once), Ok(BusAddress::new(board, bank, output)));
    }

    #[test]
    fn unmatched_codes_pass_through(code in "[A-Z][0-9]{1,2}") {
        let rules = [AliasRule::exact("trough", "A0-B0-1"), AliasRule::prefix("board", "A")];
        prop_assert_eq!(resolve_alias(&code, &rules), code);
    }

    #[test]
    fn parsed_addresses_have_distinct_flat_banks(
        a in (0u8..=255, 0u8..4, 0u8..8),
        b in (0u8..=255, 0u8..4, 0u8..8),
    ) {
        let first = parse_bus_address(&format!("{}/{}/{}", a.0, a.1, a.2));
        let second = parse_bus_address(&format!("{}/{}/{}", b.0, b.1, b.2));
        if let (Ok(first), Ok(second)) = (first, second) {
            prop_assert_eq!(
                first.bank_id() == second.bank_id(),
                (first.board, first.bank) == (second.board, second.bank)
            );
        }
    }
}
