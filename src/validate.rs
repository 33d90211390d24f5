//! Structural validation of universal documents.
//!
//! Findings are collected, never raised. The converter does not call these
//! checks; validating is up to the caller.

use serde::Serialize;
use serde_yaml::Value;
use std::collections::HashSet;

use crate::model::{is_identifier, TypeDefinition};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Check a loosely-typed universal document
pub fn validate(doc: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    match non_empty_str(doc.get("name")) {
        None => errors.push("UDT missing name".to_string()),
        Some(name) if !is_identifier(name) => {
            errors.push(format!("UDT name '{}' is not a valid identifier", name))
        }
        Some(_) => {}
    }

    let Some(members) = doc.get("members").and_then(Value::as_sequence) else {
        errors.push("UDT must have a members array".to_string());
        return ValidationReport::from_errors(errors);
    };

    let mut seen = HashSet::new();
    for (idx, member) in members.iter().enumerate() {
        let name = non_empty_str(member.get("name"));
        if name.is_none() {
            errors.push(format!("Member {} missing name", idx));
        }

        if non_empty_str(member.get("type")).is_none() {
            let label = name.map_or_else(|| idx.to_string(), str::to_string);
            errors.push(format!("Member {} missing type", label));
        }

        if let Some(name) = name {
            if !seen.insert(name) {
                errors.push(format!("Duplicate member name {}", name));
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Parse YAML text and check it. Unparseable text is reported as a finding.
pub fn validate_str(text: &str) -> ValidationReport {
    match serde_yaml::from_str::<Value>(text) {
        Ok(doc) => validate(&doc),
        Err(e) => ValidationReport::from_errors(vec![format!("Invalid YAML: {}", e)]),
    }
}

/// Check a built definition: name rule and member uniqueness
pub fn validate_definition(udt: &TypeDefinition) -> ValidationReport {
    let mut errors = Vec::new();

    if udt.name().is_empty() {
        errors.push("UDT missing name".to_string());
    } else if !is_identifier(udt.name()) {
        errors.push(format!("UDT name '{}' is not a valid identifier", udt.name()));
    }

    let mut seen = HashSet::new();
    for member in udt.members() {
        if !is_identifier(&member.name) {
            errors.push(format!("Member name '{}' is not a valid identifier", member.name));
        }
        if !seen.insert(member.name.as_str()) {
            errors.push(format!("Duplicate member name {}", member.name));
        }
    }

    ValidationReport::from_errors(errors)
}
