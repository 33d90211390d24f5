use regex::Regex;
use std::sync::LazyLock;

use crate::model::ScalarKind::{Bool, Dint, Int, Lint, Real, String as Str};
use crate::model::TypeDefinition;
use crate::packml::{self, CommentStyle, Dialect};

use super::structured::{block_comment, StDialect};
use super::types::{Exporter, FormatError, Importer, VendorAdapter, VendorKind};

static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bTYPE\s+"(?<name>[^"]+)""#).expect("Failed to compile TYPE regex")
});

static END_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bEND_TYPE\b").expect("Failed to compile END_TYPE regex"));

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\(\*\s*(?<text>.*?)\s*\*\)").expect("Failed to compile comment regex")
});

const SCL: StDialect = StDialect {
    vendor: "Siemens",
    keywords: [
        (Bool, "Bool"),
        (Int, "Int"),
        (Dint, "DInt"),
        (Lint, "LInt"),
        (Real, "Real"),
        (Str, "String"),
    ],
    array_keyword: "Array",
    of_keyword: "of",
    true_token: "true",
    false_token: "false",
};

/// Siemens TIA Portal SCL type source (`.scl`)
pub struct Siemens;

impl Importer for Siemens {
    fn parse(&self, text: &str) -> Result<TypeDefinition, FormatError> {
        let anchor = TYPE_RE.captures(text).ok_or(FormatError::MissingAnchor {
            vendor: SCL.vendor,
            anchor: "TYPE declaration",
        })?;
        let body = &text[anchor.get(0).map_or(0, |m| m.end())..];

        // Description is the block comment trailing END_TYPE
        let description = END_TYPE_RE
            .find(body)
            .and_then(|end| COMMENT_RE.captures(&body[end.end()..]))
            .map(|c| c["text"].to_string())
            .unwrap_or_default();

        let udt = SCL
            .parse_members(body)?
            .into_iter()
            .fold(TypeDefinition::new(&anchor["name"], description), |udt, m| {
                udt.push_member(m)
            });

        tracing::debug!(
            "Parsed Siemens type {} with {} members",
            udt.name(),
            udt.members().len()
        );
        Ok(udt)
    }
}

impl Exporter for Siemens {
    fn generate(&self, udt: &TypeDefinition) -> String {
        let mut out = format!("TYPE \"{}\"\nVERSION : 0.1\n   STRUCT\n", udt.name());
        for member in udt.members() {
            out.push_str("      ");
            out.push_str(&SCL.member_line(member));
            out.push('\n');
        }
        out.push_str("   END_STRUCT;\n\nEND_TYPE\n");

        if !udt.description().is_empty() {
            out.push_str(&format!("\n(* {} *)\n", block_comment(udt.description())));
        }
        out
    }
}

impl VendorAdapter for Siemens {
    fn kind(&self) -> VendorKind {
        VendorKind::Siemens
    }

    fn file_extension(&self) -> &'static str {
        "scl"
    }

    fn importer(&self) -> Option<&dyn Importer> {
        Some(self)
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }

    /// Global data blocks are addressed with a quoted name
    fn generate_state_machine(&self, instance: &str) -> Option<String> {
        Some(packml::render(
            instance,
            &Dialect {
                quote_instance: true,
                header: CommentStyle::Block,
            },
        ))
    }
}
