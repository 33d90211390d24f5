use regex::Regex;
use std::sync::LazyLock;

use crate::model::ScalarKind::{Bool, Dint, Int, Lint, Real, String as Str};
use crate::model::TypeDefinition;
use crate::packml::{self, CommentStyle, Dialect};

use super::structured::{single_line, StDialect};
use super::types::{Exporter, FormatError, Importer, VendorAdapter, VendorKind};

static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bTYPE\s+(?<name>[A-Za-z_][A-Za-z0-9_]*)\s*:")
        .expect("Failed to compile TYPE regex")
});

static END_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bEND_TYPE\b").expect("Failed to compile END_TYPE regex"));

static LINE_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//[ \t]*(?<text>[^\r\n]*)").expect("Failed to compile comment regex")
});

static BLOCK_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\(\*\s*(?<text>.*?)\s*\*\)").expect("Failed to compile comment regex")
});

const IEC: StDialect = StDialect {
    vendor: "Beckhoff",
    keywords: [
        (Bool, "BOOL"),
        (Int, "INT"),
        (Dint, "DINT"),
        (Lint, "LINT"),
        (Real, "REAL"),
        (Str, "STRING"),
    ],
    array_keyword: "ARRAY",
    of_keyword: "OF",
    true_token: "TRUE",
    false_token: "FALSE",
};

/// Beckhoff TwinCAT 3 data unit type (`.TcDUT`).
///
/// Accepts both the bare declaration and the XML `TcPlcObject` wrapper that
/// TwinCAT writes to disk.
pub struct Beckhoff;

/// `// ...` after END_TYPE, or a `(* ... *)` header before the declaration
fn find_description(text: &str, anchor_start: usize, body: &str) -> String {
    let trailing = END_TYPE_RE
        .find(body)
        .and_then(|end| LINE_COMMENT_RE.captures(&body[end.end()..]))
        .map(|c| c["text"].trim().to_string());

    trailing
        .or_else(|| {
            BLOCK_COMMENT_RE
                .captures(&text[..anchor_start])
                .map(|c| single_line(&c["text"]))
        })
        .unwrap_or_default()
}

impl Importer for Beckhoff {
    fn parse(&self, text: &str) -> Result<TypeDefinition, FormatError> {
        let anchor = TYPE_RE.captures(text).ok_or(FormatError::MissingAnchor {
            vendor: IEC.vendor,
            anchor: "TYPE declaration",
        })?;
        let (start, end) = anchor.get(0).map_or((0, 0), |m| (m.start(), m.end()));
        let body = &text[end..];

        let description = find_description(text, start, body);
        if description.is_empty() {
            tracing::debug!("Beckhoff type {} has no description", &anchor["name"]);
        }

        let udt = IEC
            .parse_members(body)?
            .into_iter()
            .fold(TypeDefinition::new(&anchor["name"], description), |udt, m| {
                udt.push_member(m)
            });

        tracing::debug!(
            "Parsed Beckhoff DUT {} with {} members",
            udt.name(),
            udt.members().len()
        );
        Ok(udt)
    }
}

impl Exporter for Beckhoff {
    fn generate(&self, udt: &TypeDefinition) -> String {
        let mut out = String::from("{attribute 'qualified_only'}\n{attribute 'strict'}\n");
        out.push_str(&IEC.render_struct(udt, "\t"));
        if !udt.description().is_empty() {
            out.push_str(&format!("\n// {}\n", single_line(udt.description())));
        }
        out
    }
}

impl VendorAdapter for Beckhoff {
    fn kind(&self) -> VendorKind {
        VendorKind::Beckhoff
    }

    fn file_extension(&self) -> &'static str {
        "TcDUT"
    }

    fn importer(&self) -> Option<&dyn Importer> {
        Some(self)
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }

    fn generate_state_machine(&self, instance: &str) -> Option<String> {
        Some(packml::render(
            instance,
            &Dialect {
                quote_instance: false,
                header: CommentStyle::Line,
            },
        ))
    }
}
