//! Vendor dialect adapters.
//!
//! Each vendor is a unit struct implementing [`VendorAdapter`], plus
//! [`Importer`] and/or [`Exporter`] for the directions it supports.

pub mod beckhoff;
pub mod codesys;
pub mod rockwell;
pub mod siemens;
mod structured;
pub mod types;

pub use beckhoff::Beckhoff;
pub use codesys::Codesys;
pub use rockwell::Rockwell;
pub use siemens::Siemens;
pub use types::{Exporter, FormatError, Importer, VendorAdapter, VendorKind};
