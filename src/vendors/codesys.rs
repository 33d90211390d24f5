use crate::model::ScalarKind::{Bool, Dint, Int, Lint, Real, String as Str};
use crate::model::TypeDefinition;
use crate::packml::{self, CommentStyle, Dialect};

use super::structured::{block_comment, StDialect};
use super::types::{Exporter, Importer, VendorAdapter, VendorKind};

const ST: StDialect = StDialect {
    vendor: "CODESYS",
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

/// CODESYS structured text declaration (`.st`). Export only.
pub struct Codesys;

impl Exporter for Codesys {
    fn generate(&self, udt: &TypeDefinition) -> String {
        let mut out = String::new();
        if !udt.description().is_empty() {
            out.push_str(&format!("(* {} *)\n", block_comment(udt.description())));
        }
        out.push_str(&ST.render_struct(udt, "    "));
        out
    }
}

impl VendorAdapter for Codesys {
    fn kind(&self) -> VendorKind {
        VendorKind::Codesys
    }

    fn file_extension(&self) -> &'static str {
        "st"
    }

    fn importer(&self) -> Option<&dyn Importer> {
        None
    }

    fn exporter(&self) -> Option<&dyn Exporter> {
        Some(self)
    }

    fn generate_state_machine(&self, instance: &str) -> Option<String> {
        Some(packml::render(
            instance,
            &Dialect {
                quote_instance: false,
                header: CommentStyle::Block,
            },
        ))
    }
}
