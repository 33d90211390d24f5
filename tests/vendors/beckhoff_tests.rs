//! Tests for the Beckhoff TwinCAT adapter

use crate::common::assertions::*;
use crate::common::example_files::*;
use crate::common::fixtures::*;
use crate::common::read_example_file;
use plcudt::model::{Literal, ScalarKind, TypeDefinition, TypeRef};
use plcudt::vendors::{Beckhoff, Exporter, FormatError, Importer};

// ============================================
// Example File Tests
// ============================================

#[test]
fn test_parse_example_tank() {
    let udt = Beckhoff.parse(&read_example_file(BECKHOFF_TANK)).unwrap();

    assert_eq!(udt.name(), "ST_Tank");
    assert_eq!(udt.description(), "");
    assert_eq!(
        member_names(&udt),
        vec![
            "Level",
            "HighLevel",
            "LowLevel",
            "Capacity",
            "Inlets",
            "Temperatures",
            "Product",
            "FillCount",
            "Priority"
        ]
    );
}

#[test]
fn test_example_types_and_defaults() {
    let udt = Beckhoff.parse(&read_example_file(BECKHOFF_TANK)).unwrap();

    assert_eq!(udt.member("Level").unwrap().default_value, Some(Literal::Real(0.0)));
    assert_eq!(udt.member("HighLevel").unwrap().default_value, Some(Literal::Bool(false)));
    assert_eq!(udt.member("Capacity").unwrap().default_value, Some(Literal::Int(5000)));
    assert_eq!(
        udt.member("Inlets").unwrap().type_ref,
        array(TypeRef::named("ValveModule"), 1, 4)
    );
    assert_eq!(udt.member("Product").unwrap().default_value, Some(Literal::from("Water")));
    assert_eq!(udt.member("Temperatures").unwrap().description, "");
}

// ============================================
// Generation Tests
// ============================================

#[test]
fn test_generate_pragmas_and_tabs() {
    let dut = Beckhoff.generate(&kitchen_sink());
    assert!(dut.starts_with("{attribute 'qualified_only'}\n{attribute 'strict'}\nTYPE KitchenSink :\nSTRUCT\n"));
    assert!(dut.contains("\tEnabled : BOOL := TRUE; // Enable flag\n"));
    assert!(dut.contains("\tBuffer : ARRAY[0..9] OF DINT; // Ring buffer\n"));
    assert!(dut.contains("\tStatus : Status; // Nested status\n"));
    assert!(dut.contains("END_STRUCT\nEND_TYPE\n\n// Every member shape\n"));
}

#[test]
fn test_roundtrip_preserves_everything() {
    for udt in [kitchen_sink(), offset_array()] {
        let parsed = Beckhoff.parse(&Beckhoff.generate(&udt)).unwrap();
        assert_same_definition(&parsed, &udt);
    }
}

#[test]
fn test_empty_struct() {
    let udt = TypeDefinition::new("Nothing", "");
    let parsed = Beckhoff.parse(&Beckhoff.generate(&udt)).unwrap();
    assert_eq!(parsed, udt);
}

// ============================================
// Error Handling Tests
// ============================================

#[test]
fn test_inverted_array_bounds() {
    let text = "TYPE Bad :\nSTRUCT\n\tA : ARRAY[10..1] OF INT;\nEND_STRUCT\nEND_TYPE\n";
    match Beckhoff.parse(text) {
        Err(FormatError::InvalidMember { vendor, member, .. }) => {
            assert_eq!(vendor, "Beckhoff");
            assert_eq!(member, "A");
        }
        other => panic!("expected invalid member, got {:?}", other),
    }
}

#[test]
fn test_missing_anchor() {
    let err = Beckhoff.parse("STRUCT\n\tA : INT;\nEND_STRUCT").unwrap_err();
    assert_eq!(err.to_string(), "Invalid Beckhoff format: no TYPE declaration found");
}

#[test]
fn test_lowercase_keywords_accepted() {
    let text = "TYPE T :\nSTRUCT\n\tA : bool := true;\n\tB : array[0..1] of int;\nEND_STRUCT\nEND_TYPE\n";
    let udt = Beckhoff.parse(text).unwrap();
    assert_eq!(udt.members()[0].type_ref, TypeRef::Scalar(ScalarKind::Bool));
    assert_eq!(udt.members()[0].default_value, Some(Literal::Bool(true)));
    assert_eq!(udt.members()[1].type_ref.to_string(), "ARRAY[0..1] OF INT");
}
