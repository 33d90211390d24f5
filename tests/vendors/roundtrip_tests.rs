//! Cross-vendor round trips through the universal format
//!
//! Tests cover:
//! - parse(generate(x)) for every import-capable vendor
//! - A -> universal -> B -> universal -> A idempotence
//! - Built-in types through every dialect

use crate::common::assertions::*;
use crate::common::example_files::*;
use crate::common::fixtures::*;
use crate::common::read_example_file;
use plcudt::converter;
use plcudt::model::builtins;
use plcudt::model::{BuiltinType, Literal, ScalarKind, TypeDefinition, TypeRef};
use plcudt::vendors::{Exporter, Importer, VendorAdapter, VendorKind};
use strum::IntoEnumIterator;

fn through(udt: &TypeDefinition, kind: VendorKind) -> TypeDefinition {
    let adapter = kind.adapter();
    let text = adapter.exporter().unwrap().generate(udt);
    adapter.importer().unwrap().parse(&text).unwrap()
}

fn lossless(kind: VendorKind) -> bool {
    matches!(kind, VendorKind::Siemens | VendorKind::Beckhoff)
}

// ============================================
// Per-Vendor Fidelity Tests
// ============================================

#[test]
fn test_builtins_through_every_importer() {
    for kind in VendorKind::iter().filter(|k| k.adapter().supports_import()) {
        for builtin in BuiltinType::iter() {
            let udt = builtin.build();
            let parsed = through(&udt, kind);
            if lossless(kind) {
                assert_same_definition(&parsed, &udt);
            } else {
                assert_same_shape(&parsed, &udt);
            }
        }
    }
}

#[test]
fn test_rockwell_keeps_shape_when_zero_based() {
    let udt = kitchen_sink();
    assert_same_shape(&through(&udt, VendorKind::Rockwell), &udt);
}

#[test]
fn test_mismatched_literal_kinds_survive_structured_dialects() {
    let udt = TypeDefinition::new("Loose", "")
        .with_member("Flag", ScalarKind::Bool, Some(Literal::Int(1)), "")
        .with_member("Mode", TypeRef::named("Status"), Some(Literal::Int(3)), "")
        .with_member("Gains", array(ScalarKind::Real.into(), 1, 4), Some(Literal::Real(0.5)), "")
        .with_member("Preset", TypeRef::named("Recipe"), Some(Literal::from("Default")), "");

    for kind in [VendorKind::Siemens, VendorKind::Beckhoff] {
        assert_eq!(through(&udt, kind), udt, "{} changed literal kinds", kind);
    }
}

// ============================================
// Universal Pivot Tests
// ============================================

#[test]
fn test_siemens_beckhoff_pivot_idempotent() {
    let scl = read_example_file(SIEMENS_MOTOR);

    let universal_a = converter::to_universal(&scl, "siemens").unwrap();
    let dut = converter::from_universal(&universal_a, "beckhoff").unwrap();
    let universal_b = converter::to_universal(&dut, "beckhoff").unwrap();
    assert_eq!(universal_a, universal_b);

    let scl_again = converter::from_universal(&universal_b, "siemens").unwrap();
    let universal_c = converter::to_universal(&scl_again, "siemens").unwrap();
    assert_eq!(universal_a, universal_c);
}

#[test]
fn test_beckhoff_example_to_siemens_and_back() {
    let dut = read_example_file(BECKHOFF_TANK);
    let original = converter::to_definition(&dut, "beckhoff").unwrap();

    let scl = converter::convert(&dut, "beckhoff", "siemens").unwrap();
    let back = converter::convert(&scl, "siemens", "beckhoff").unwrap();
    assert_same_definition(&converter::to_definition(&back, "beckhoff").unwrap(), &original);
}

#[test]
fn test_rockwell_to_siemens_has_no_defaults() {
    let l5x = read_example_file(ROCKWELL_PUMP);
    let scl = converter::convert(&l5x, "rockwell", "siemens").unwrap();
    assert!(scl.contains("      Running : Bool; // Running feedback\n"));
    assert!(scl.contains("      FaultHistory : Array[0..7] of Int; // Last eight fault codes\n"));
    assert!(!scl.contains(":="));
}

#[test]
fn test_siemens_to_rockwell_flattens_one_based_array() {
    let scl = read_example_file(SIEMENS_MOTOR);
    let l5x = converter::convert(&scl, "siemens", "rockwell").unwrap();
    assert!(l5x.contains("Name=\"TripHistory\" DataType=\"DINT[10]\" Dimension=\"10\""));

    let parsed = converter::to_definition(&l5x, "rockwell").unwrap();
    assert_eq!(
        parsed.member("TripHistory").unwrap().type_ref,
        array(plcudt::ScalarKind::Dint.into(), 0, 9)
    );
}

#[test]
fn test_universal_example_to_every_exporter() {
    let yaml = read_example_file(UNIVERSAL_CONVEYOR);
    for kind in VendorKind::iter() {
        let text = converter::from_universal(&yaml, kind.as_ref()).unwrap();
        assert!(text.contains("Conveyor"), "{} output lacks the type name", kind);
        assert!(text.contains("Zones"), "{} output lacks members", kind);
    }
}

#[test]
fn test_named_references_pass_through() {
    let udt = builtins::status();
    let module = plcudt::model::equipment::valve_module();
    for kind in [VendorKind::Rockwell, VendorKind::Siemens, VendorKind::Beckhoff] {
        let parsed = through(&module, kind);
        assert_eq!(parsed.members()[1].type_ref.to_string(), udt.name());
    }
}
