//! Vendor registry.
//!
//! The vendor table is the closed [`VendorKind`] enum; this module provides
//! the lookups used by the converter and the command-line shell:
//! - Resolve an adapter from a user-supplied vendor key
//! - Find vendors whose output matches a file extension
//! - Name exported files

use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::model::TypeDefinition;
use crate::vendors::{VendorAdapter, VendorKind};

/// All registered vendors, in declaration order
pub fn get_vendors() -> Vec<VendorKind> {
    VendorKind::iter().collect()
}

/// Get adapter by vendor key (case-insensitive)
pub fn get_adapter(key: &str) -> Option<&'static dyn VendorAdapter> {
    VendorKind::from_str(key.trim()).ok().map(|kind| kind.adapter())
}

/// Comma-separated vendor keys, for error messages
pub fn supported_vendor_keys() -> String {
    VendorKind::iter()
        .map(|k| k.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Find vendors whose file extension matches, leading dot optional
pub fn find_vendors_by_extension(extension: &str) -> Vec<VendorKind> {
    let ext = extension.trim_start_matches('.');

    VendorKind::iter()
        .filter(|k| k.adapter().file_extension().eq_ignore_ascii_case(ext))
        .collect()
}

/// `<name>.<extension>` file name for an exported definition
pub fn export_file_name(udt: &TypeDefinition, kind: VendorKind) -> String {
    format!("{}.{}", udt.name(), kind.adapter().file_extension())
}
