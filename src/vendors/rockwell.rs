use regex::Regex;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

use crate::model::{Member, ModelError, ScalarKind, TypeDefinition, TypeRef};
use crate::packml::{self, CommentStyle, Dialect};

use super::types::{Exporter, FormatError, Importer, VendorAdapter, VendorKind};

const VENDOR: &str = "Rockwell";

static DATATYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<DataType\s+Name="(?<name>[^"]*)"[^>]*>"#)
        .expect("Failed to compile DataType regex")
});

static MEMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<Member\s+(?<attrs>[^>]*?)\s*(?:/>|>(?<body>.*?)</Member>)")
        .expect("Failed to compile Member regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?<key>[A-Za-z]+)\s*=\s*"(?<value>[^"]*)""#)
        .expect("Failed to compile attribute regex")
});

static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<Description>(?<body>.*?)</Description>")
        .expect("Failed to compile Description regex")
});

static CDATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(?<text>.*?)\]\]>").expect("Failed to compile CDATA regex")
});

/// `BASE[size]`, outermost dimension last
static SIZED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<base>.+)\[\s*(?<size>\d+)\s*\]$").expect("Failed to compile array regex")
});

/// Rockwell Studio 5000 L5X data type export.
///
/// Arrays are flattened to an element count, so lower bounds are lost and
/// always read back as zero. Data types carry no member defaults.
pub struct Rockwell;

/// Member attributes of interest
#[derive(Debug, Default)]
struct MemberAttrs {
    name: Option<String>,
    data_type: Option<String>,
    dimension: u64,
    hidden: bool,
}

impl MemberAttrs {
    fn collect(raw: &str) -> Self {
        let mut attrs = MemberAttrs::default();
        for captures in ATTR_RE.captures_iter(raw) {
            let value = xml_unescape(&captures["value"]);
            match &captures["key"] {
                "Name" => attrs.name = Some(value),
                "DataType" => attrs.data_type = Some(value),
                "Dimension" => attrs.dimension = first_dimension(&value),
                "Hidden" => attrs.hidden = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }
        attrs
    }
}

/// `Dimension="10"` or the multi-dimensional `Dimension="2,3"`
fn first_dimension(raw: &str) -> u64 {
    raw.split(',')
        .next()
        .and_then(|d| d.trim().parse().ok())
        .unwrap_or(0)
}

fn scalar_for(token: &str) -> Option<ScalarKind> {
    // Bits in a UDT are stored as BIT members targeting a hidden host
    if token.eq_ignore_ascii_case("BIT") {
        return Some(ScalarKind::Bool);
    }
    ScalarKind::iter().find(|k| k.as_ref().eq_ignore_ascii_case(token))
}

fn decode_type(token: &str) -> Result<TypeRef, ModelError> {
    let token = token.trim();

    if let Some(captures) = SIZED_RE.captures(token) {
        let size: u64 = captures["size"]
            .parse()
            .map_err(|_| ModelError::BoundOutOfRange(captures["size"].to_string()))?;
        let base = decode_type(&captures["base"])?;
        return TypeRef::array_of_size(base, size);
    }

    // Canonical spelling written for arrays too large to size
    if token.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("ARRAY")) {
        return token.parse();
    }

    match scalar_for(token) {
        Some(kind) => Ok(TypeRef::Scalar(kind)),
        None => {
            tracing::debug!("Rockwell: passing through type '{}' as a named reference", token);
            Ok(TypeRef::named(token))
        }
    }
}

/// L5X data type spelling and the outer element count. An array too large
/// to count keeps the canonical `ARRAY[..] OF` spelling.
fn encode_type(type_ref: &TypeRef) -> (String, u64) {
    match type_ref {
        TypeRef::Scalar(kind) => (kind.as_ref().to_string(), 0),
        TypeRef::Named(name) => (name.clone(), 0),
        TypeRef::Array { base, lower, .. } => {
            let Some(count) = type_ref.element_count() else {
                tracing::warn!("Rockwell: {} has no element count, writing it unsized", type_ref);
                return (type_ref.to_string(), 0);
            };
            if *lower != 0 {
                tracing::warn!(
                    "Rockwell arrays are zero-based; lower bound {} is not preserved",
                    lower
                );
            }
            let (base_type, _) = encode_type(base);
            (format!("{}[{}]", base_type, count), count)
        }
    }
}

fn radix(type_ref: &TypeRef) -> Option<&'static str> {
    match type_ref {
        TypeRef::Scalar(ScalarKind::Real) => Some("Float"),
        TypeRef::Scalar(kind) if kind.is_integer() || *kind == ScalarKind::Bool => {
            Some("Decimal")
        }
        TypeRef::Array { base, .. } => radix(base),
        _ => None,
    }
}

/// Text of a `<Description>` element, CDATA sections joined
fn description_text(body: &str) -> String {
    let sections: Vec<&str> = CDATA_RE
        .captures_iter(body)
        .filter_map(|c| c.name("text"))
        .map(|m| m.as_str())
        .collect();

    if sections.is_empty() {
        xml_unescape(body.trim())
    } else {
        sections.concat().trim().to_string()
    }
}

fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn xml_unescape(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

impl Importer for Rockwell {
    fn parse(&self, text: &str) -> Result<TypeDefinition, FormatError> {
        let anchor = DATATYPE_RE
            .captures(text)
            .ok_or(FormatError::MissingAnchor {
                vendor: VENDOR,
                anchor: "DataType",
            })?;
        let name = xml_unescape(&anchor["name"]);
        let body = &text[anchor.get(0).map_or(0, |m| m.end())..];

        // The type description sits before the first member
        let header = &body[..body.find("<Member").unwrap_or(body.len())];
        let description = DESCRIPTION_RE
            .captures(header)
            .map(|c| description_text(&c["body"]))
            .unwrap_or_default();

        let mut udt = TypeDefinition::new(name, description);

        for captures in MEMBER_RE.captures_iter(body) {
            let attrs = MemberAttrs::collect(&captures["attrs"]);
            let Some(member_name) = attrs.name else {
                return Err(FormatError::InvalidMember {
                    vendor: VENDOR,
                    member: String::new(),
                    reason: "missing Name attribute".to_string(),
                });
            };

            if attrs.hidden {
                tracing::debug!("Rockwell: skipping hidden member '{}'", member_name);
                continue;
            }

            let data_type = attrs.data_type.ok_or_else(|| FormatError::InvalidMember {
                vendor: VENDOR,
                member: member_name.clone(),
                reason: "missing DataType attribute".to_string(),
            })?;

            let invalid = |e: ModelError| FormatError::InvalidMember {
                vendor: VENDOR,
                member: member_name.clone(),
                reason: e.to_string(),
            };
            let mut type_ref = decode_type(&data_type).map_err(invalid)?;
            if attrs.dimension > 0 && !type_ref.is_array() {
                type_ref = TypeRef::array_of_size(type_ref, attrs.dimension).map_err(invalid)?;
            }

            let member_description = captures
                .name("body")
                .and_then(|b| DESCRIPTION_RE.captures(b.as_str()))
                .map(|c| description_text(&c["body"]))
                .unwrap_or_default();

            udt = udt.push_member(Member::new(member_name, type_ref, None, member_description));
        }

        tracing::debug!(
            "Parsed Rockwell data type {} with {} members",
            udt.name(),
            udt.members().len()
        );
        Ok(udt)
    }
}

impl Exporter for Rockwell {
    fn generate(&self, udt: &TypeDefinition) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        out.push_str("<RSLogix5000Content SchemaRevision=\"1.0\" SoftwareRevision=\"32.00\">\n");
        out.push_str("  <Controller Use=\"Context\" Name=\"MainController\">\n");
        out.push_str("    <DataTypes Use=\"Context\">\n");
        out.push_str(&format!(
            "      <DataType Name=\"{}\" Family=\"NoFamily\" Class=\"User\">\n",
            xml_escape(udt.name())
        ));
        if !udt.description().is_empty() {
            out.push_str(&format!(
                "        <Description>{}</Description>\n",
                cdata(udt.description())
            ));
        }
        out.push_str("        <Members>\n");

        for member in udt.members() {
            let (data_type, dimension) = encode_type(&member.type_ref);
            let radix = radix(&member.type_ref)
                .map(|r| format!(" Radix=\"{}\"", r))
                .unwrap_or_default();
            out.push_str(&format!(
                "          <Member Name=\"{}\" DataType=\"{}\" Dimension=\"{}\"{} Hidden=\"false\" ExternalAccess=\"Read/Write\"",
                xml_escape(&member.name),
                xml_escape(&data_type),
                dimension,
                radix
            ));

            if member.description.is_empty() {
                out.push_str("/>\n");
            } else {
                out.push_str(">\n");
                out.push_str(&format!(
                    "            <Description>{}</Description>\n",
                    cdata(&member.description)
                ));
                out.push_str("          </Member>\n");
            }
        }

        out.push_str("        </Members>\n");
        out.push_str("      </DataType>\n");
        out.push_str("    </DataTypes>\n");
        out.push_str("  </Controller>\n");
        out.push_str("</RSLogix5000Content>\n");
        out
    }
}

impl VendorAdapter for Rockwell {
    fn kind(&self) -> VendorKind {
        VendorKind::Rockwell
    }

    fn file_extension(&self) -> &'static str {
        "L5X"
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
                header: CommentStyle::Block,
            },
        ))
    }
}
