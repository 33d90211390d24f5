//! Tests for the Rockwell L5X adapter
//!
//! Tests cover:
//! - Parsing a Studio 5000 export
//! - Array flattening and the zero-based read back
//! - Dropped defaults
//! - Error handling

use crate::common::assertions::*;
use crate::common::example_files::*;
use crate::common::fixtures::*;
use crate::common::read_example_file;
use plcudt::model::{Literal, ScalarKind, TypeDefinition, TypeRef};
use plcudt::vendors::{Exporter, FormatError, Importer, Rockwell};

// ============================================
// Example File Tests
// ============================================

#[test]
fn test_parse_example_pump() {
    let udt = Rockwell.parse(&read_example_file(ROCKWELL_PUMP)).unwrap();

    assert_eq!(udt.name(), "Pump");
    assert_eq!(udt.description(), "Centrifugal transfer pump");
    assert_eq!(
        member_names(&udt),
        vec![
            "Running",
            "Faulted",
            "SpeedSP",
            "RunHours",
            "StartCount",
            "FaultHistory",
            "Tag",
            "Alarm"
        ]
    );
}

#[test]
fn test_example_member_types() {
    let udt = Rockwell.parse(&read_example_file(ROCKWELL_PUMP)).unwrap();

    assert_eq!(udt.member("Running").unwrap().type_ref, TypeRef::Scalar(ScalarKind::Bool));
    assert_eq!(udt.member("SpeedSP").unwrap().type_ref, TypeRef::Scalar(ScalarKind::Real));
    assert_eq!(udt.member("StartCount").unwrap().type_ref, TypeRef::Scalar(ScalarKind::Lint));
    assert_eq!(
        udt.member("FaultHistory").unwrap().type_ref.to_string(),
        "ARRAY[0..7] OF INT"
    );
    assert_eq!(udt.member("Alarm").unwrap().type_ref, TypeRef::named("Alarm"));
}

#[test]
fn test_example_descriptions_trimmed() {
    let udt = Rockwell.parse(&read_example_file(ROCKWELL_PUMP)).unwrap();
    assert_eq!(udt.member("SpeedSP").unwrap().description, "Speed setpoint (%)");
    assert_eq!(udt.member("Faulted").unwrap().description, "");
}

#[test]
fn test_hidden_host_member_skipped() {
    let udt = Rockwell.parse(&read_example_file(ROCKWELL_PUMP)).unwrap();
    assert!(udt.members().iter().all(|m| !m.name.starts_with("ZZZZ")));
}

// ============================================
// Generation Tests
// ============================================

#[test]
fn test_generate_document_structure() {
    let l5x = Rockwell.generate(&kitchen_sink());
    assert!(l5x.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
    assert!(l5x.contains("<RSLogix5000Content SchemaRevision=\"1.0\""));
    assert!(l5x.contains("<DataType Name=\"KitchenSink\" Family=\"NoFamily\" Class=\"User\">"));
    assert!(l5x.trim_end().ends_with("</RSLogix5000Content>"));
}

#[test]
fn test_array_generates_element_count() {
    let udt = TypeDefinition::new("Buf", "").with_member(
        "Data",
        array(ScalarKind::Dint.into(), 0, 9),
        None,
        "",
    );
    let l5x = Rockwell.generate(&udt);
    assert!(l5x.contains("DataType=\"DINT[10]\""));

    let parsed = Rockwell.parse(&l5x).unwrap();
    assert_eq!(parsed.members()[0].type_ref.to_string(), "ARRAY[0..9] OF DINT");
}

#[test]
fn test_lower_bound_lost() {
    let parsed = Rockwell.parse(&Rockwell.generate(&offset_array())).unwrap();
    assert_eq!(parsed.members()[0].type_ref, array(ScalarKind::Real.into(), 0, 7));
}

#[test]
fn test_uncountable_array_keeps_canonical_spelling() {
    let udt = TypeDefinition::new("Huge", "").with_member(
        "All",
        array(ScalarKind::Dint.into(), i64::MIN, i64::MAX),
        None,
        "",
    );
    let l5x = Rockwell.generate(&udt);
    assert!(l5x.contains("Dimension=\"0\""));

    let parsed = Rockwell.parse(&l5x).unwrap();
    assert_eq!(parsed.members()[0].type_ref, udt.members()[0].type_ref);
}

#[test]
fn test_defaults_not_exported() {
    let parsed = Rockwell.parse(&Rockwell.generate(&kitchen_sink())).unwrap();
    assert!(parsed.members().iter().all(|m| m.default_value.is_none()));
}

#[test]
fn test_generate_is_deterministic() {
    let udt = kitchen_sink();
    assert_eq!(Rockwell.generate(&udt), Rockwell.generate(&udt));
}

#[test]
fn test_special_characters_survive() {
    let udt = TypeDefinition::new("Quote", "Temp > 90 \"hot\"").with_member(
        "Note",
        ScalarKind::String,
        Some(Literal::from("x")),
        "R&D <draft>",
    );
    let parsed = Rockwell.parse(&Rockwell.generate(&udt)).unwrap();
    assert_eq!(parsed.description(), "Temp > 90 \"hot\"");
    assert_eq!(parsed.members()[0].description, "R&D <draft>");
}

// ============================================
// Error Handling Tests
// ============================================

#[test]
fn test_missing_datatype_anchor() {
    let err = Rockwell
        .parse("<RSLogix5000Content><Controller/></RSLogix5000Content>")
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid Rockwell format: no DataType found");
}

#[test]
fn test_member_without_datatype() {
    let text = r#"<DataType Name="T"><Members><Member Name="A" Dimension="0"/></Members></DataType>"#;
    match Rockwell.parse(text) {
        Err(FormatError::InvalidMember { member, reason, .. }) => {
            assert_eq!(member, "A");
            assert!(reason.contains("DataType"));
        }
        other => panic!("expected invalid member, got {:?}", other),
    }
}

#[test]
fn test_empty_members() {
    let udt = Rockwell
        .parse(r#"<DataType Name="Empty" Family="NoFamily" Class="User"><Members></Members></DataType>"#)
        .unwrap();
    assert_eq!(udt.name(), "Empty");
    assert!(udt.members().is_empty());
}

#[test]
fn test_member_without_name() {
    let text = r#"<DataType Name="T"><Members><Member DataType="INT" Dimension="0"/></Members></DataType>"#;
    match Rockwell.parse(text) {
        Err(FormatError::InvalidMember { member, reason, .. }) => {
            assert_eq!(member, "");
            assert!(reason.contains("Name"));
        }
        other => panic!("expected invalid member, got {:?}", other),
    }
}
