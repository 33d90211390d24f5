use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

use crate::model::TypeDefinition;

use super::beckhoff::Beckhoff;
use super::codesys::Codesys;
use super::rockwell::Rockwell;
use super::siemens::Siemens;

/// Errors raised while reading vendor dialect text.
/// A failed parse never yields a partial definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The declaration anchor carrying the type name is absent
    #[error("Invalid {vendor} format: no {anchor} found")]
    MissingAnchor {
        vendor: &'static str,
        anchor: &'static str,
    },

    /// A member declaration could not be decoded
    #[error("Invalid {vendor} member '{member}': {reason}")]
    InvalidMember {
        vendor: &'static str,
        member: String,
        reason: String,
    },
}

/// Dialect text to canonical definition
pub trait Importer {
    fn parse(&self, text: &str) -> Result<TypeDefinition, FormatError>;
}

/// Canonical definition to dialect text. Total and deterministic.
pub trait Exporter {
    fn generate(&self, udt: &TypeDefinition) -> String;
}

/// A vendor dialect. Import and export capability follow from which of
/// [`Importer`] / [`Exporter`] the adapter exposes.
pub trait VendorAdapter: Send + Sync {
    fn kind(&self) -> VendorKind;

    /// Canonical output file extension, without the dot
    fn file_extension(&self) -> &'static str;

    fn importer(&self) -> Option<&dyn Importer>;

    fn exporter(&self) -> Option<&dyn Exporter>;

    /// PackML state machine in this dialect, if supported
    fn generate_state_machine(&self, _instance: &str) -> Option<String> {
        None
    }

    fn supports_import(&self) -> bool {
        self.importer().is_some()
    }

    fn supports_export(&self) -> bool {
        self.exporter().is_some()
    }
}

/// Supported controller vendors
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    Hash,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    Rockwell,
    Siemens,
    Codesys,
    Beckhoff,
}

impl VendorKind {
    /// Human-readable vendor name
    pub fn name(&self) -> &'static str {
        match self {
            VendorKind::Rockwell => "Rockwell",
            VendorKind::Siemens => "Siemens",
            VendorKind::Codesys => "CODESYS",
            VendorKind::Beckhoff => "Beckhoff",
        }
    }

    /// The adapter implementing this vendor's dialect
    pub fn adapter(&self) -> &'static dyn VendorAdapter {
        match self {
            VendorKind::Rockwell => &Rockwell,
            VendorKind::Siemens => &Siemens,
            VendorKind::Codesys => &Codesys,
            VendorKind::Beckhoff => &Beckhoff,
        }
    }
}
