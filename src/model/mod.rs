//! Canonical, vendor-neutral UDT model.
//!
//! Every conversion pivots through [`TypeDefinition`]. Values are built with
//! consuming builder methods and never mutated afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use plcudt::model::{Literal, ScalarKind, TypeDefinition, TypeRef};
//!
//! let udt = TypeDefinition::new("Pump", "Transfer pump")
//!     .with_member("Running", ScalarKind::Bool, Some(Literal::Bool(false)), "Running feedback")
//!     .with_member("Speed", ScalarKind::Real, Some(Literal::Real(0.0)), "Speed setpoint");
//!
//! assert_eq!(udt.members().len(), 2);
//! assert_eq!(udt.member("Speed").unwrap().type_ref, TypeRef::Scalar(ScalarKind::Real));
//! ```

pub mod builtins;
pub mod equipment;
pub mod types;

pub use builtins::BuiltinType;
pub use types::{is_identifier, Literal, Member, ModelError, ScalarKind, TypeDefinition, TypeRef};
