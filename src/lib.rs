//! plcudt - Universal PLC UDT transfer layer written in Rust
//!
//! This library translates controller user-defined types (UDTs) between vendor
//! text dialects through a vendor-neutral canonical model, and generates a
//! PackML-style equipment state machine in each dialect's syntax.
//!
//! ## Module Structure
//!
//! - [`model`] - Canonical type model and built-in ISA-88 / layer 1 types
//! - [`vendors`] - Vendor dialect adapters (Rockwell, Siemens, CODESYS, Beckhoff)
//! - [`registry`] - Vendor lookup by key and file extension
//! - [`converter`] - Import/export/convert through the universal format
//! - [`codec`] - Universal YAML interchange encoding
//! - [`packml`] - PackML state machine code generator
//! - [`validate`] - Structural validation of universal documents
//! - [`settings`] - User settings persistence

pub mod codec;
pub mod converter;
pub mod model;
pub mod packml;
pub mod registry;
pub mod settings;
pub mod validate;
pub mod vendors;

pub use converter::{convert, from_universal, generate_state_machine, to_universal, ConvertError};
pub use model::{Literal, Member, ScalarKind, TypeDefinition, TypeRef};
pub use vendors::{VendorAdapter, VendorKind};
