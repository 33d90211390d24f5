//! Import, export and vendor-to-vendor conversion.
//!
//! Every path pivots through the canonical [`TypeDefinition`]; there is no
//! direct vendor-to-vendor translation.

use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::model::TypeDefinition;
use crate::registry;
use crate::vendors::{FormatError, VendorAdapter};

/// Adapter capability named in [`ConvertError::UnsupportedOperation`]
#[derive(AsRefStr, Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Operation {
    #[strum(serialize = "import")]
    Import,
    #[strum(serialize = "export")]
    Export,
    #[strum(serialize = "state machine generation")]
    StateMachine,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unknown vendor '{vendor}'. Supported: {supported}")]
    UnknownVendor { vendor: String, supported: String },

    #[error("{vendor} does not support {operation}")]
    UnsupportedOperation {
        vendor: &'static str,
        operation: Operation,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

fn resolve(vendor: &str) -> Result<&'static dyn VendorAdapter, ConvertError> {
    registry::get_adapter(vendor).ok_or_else(|| ConvertError::UnknownVendor {
        vendor: vendor.to_string(),
        supported: registry::supported_vendor_keys(),
    })
}

fn unsupported(adapter: &dyn VendorAdapter, operation: Operation) -> ConvertError {
    ConvertError::UnsupportedOperation {
        vendor: adapter.kind().name(),
        operation,
    }
}

/// Parse vendor text into a canonical definition
pub fn to_definition(text: &str, vendor: &str) -> Result<TypeDefinition, ConvertError> {
    let adapter = resolve(vendor)?;
    let importer = adapter
        .importer()
        .ok_or_else(|| unsupported(adapter, Operation::Import))?;
    Ok(importer.parse(text)?)
}

/// Render a canonical definition as vendor text
pub fn from_definition(udt: &TypeDefinition, vendor: &str) -> Result<String, ConvertError> {
    let adapter = resolve(vendor)?;
    let exporter = adapter
        .exporter()
        .ok_or_else(|| unsupported(adapter, Operation::Export))?;
    Ok(exporter.generate(udt))
}

/// Vendor text to universal YAML
pub fn to_universal(text: &str, vendor: &str) -> Result<String, ConvertError> {
    let udt = to_definition(text, vendor)?;
    Ok(codec::to_universal_text(&udt)?)
}

/// Universal YAML to vendor text
pub fn from_universal(text: &str, vendor: &str) -> Result<String, ConvertError> {
    let udt = codec::from_universal_text(text)?;
    from_definition(&udt, vendor)
}

/// Vendor-to-vendor conversion through the universal format
pub fn convert(text: &str, source: &str, target: &str) -> Result<String, ConvertError> {
    let universal = to_universal(text, source)?;
    let output = from_universal(&universal, target)?;
    tracing::info!(
        "Converted {} -> {} ({} bytes)",
        source.trim(),
        target.trim(),
        output.len()
    );
    Ok(output)
}

/// PackML state machine for `instance` in the vendor's dialect
pub fn generate_state_machine(instance: &str, vendor: &str) -> Result<String, ConvertError> {
    let adapter = resolve(vendor)?;
    adapter
        .generate_state_machine(instance)
        .ok_or_else(|| unsupported(adapter, Operation::StateMachine))
}
