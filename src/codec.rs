//! Universal interchange encoding.
//!
//! A definition is stored as a YAML mapping with the keys `name`,
//! `description` and `members`; each member carries `name`, `type`,
//! `default` and `description`. Member order is preserved.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Literal, Member, ModelError, TypeDefinition, TypeRef};

/// Errors from encoding or decoding the universal format
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid universal document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid type for member '{member}': {source}")]
    Model {
        member: String,
        #[source]
        source: ModelError,
    },
}

/// Raw document shape, before defaults are coerced against member types
#[derive(Debug, Deserialize)]
struct UniversalDoc {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    members: Option<Vec<UniversalMember>>,
}

#[derive(Debug, Deserialize)]
struct UniversalMember {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    default: Option<Literal>,
    #[serde(default)]
    description: Option<String>,
}

/// Encode a definition as universal YAML
pub fn to_universal_text(udt: &TypeDefinition) -> Result<String, CodecError> {
    Ok(serde_yaml::to_string(udt)?)
}

/// Pretty JSON rendering of the same document
pub fn to_json(udt: &TypeDefinition) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(udt)?)
}

/// Decode universal YAML into a definition
pub fn from_universal_text(text: &str) -> Result<TypeDefinition, CodecError> {
    let doc: UniversalDoc = serde_yaml::from_str(text)?;

    let mut udt = TypeDefinition::new(doc.name, doc.description.unwrap_or_default());
    for member in doc.members.unwrap_or_default() {
        let type_ref: TypeRef = member.type_name.parse().map_err(|source| CodecError::Model {
            member: member.name.clone(),
            source,
        })?;
        udt = udt.push_member(Member::new(
            member.name,
            type_ref,
            member.default,
            member.description.unwrap_or_default(),
        ));
    }

    tracing::debug!(
        "Decoded universal type {} with {} members",
        udt.name(),
        udt.members().len()
    );
    Ok(udt)
}
