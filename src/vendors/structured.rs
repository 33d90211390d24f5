//! Shared IEC 61131-3 structured-text handling for the STRUCT-based dialects
//! (Siemens SCL, CODESYS, Beckhoff TwinCAT).
//!
//! The dialects differ in keyword spelling, array spelling and boolean tokens;
//! member declarations share one line shape:
//! `name : type [:= default]; [// comment]`.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::types::format_real;
use crate::model::{Literal, Member, ModelError, ScalarKind, TypeDefinition, TypeRef};

use super::types::FormatError;

/// One member declaration per line. There is no end-of-struct boundary, so
/// anything shaped like a declaration after `END_STRUCT` is picked up too.
static MEMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?<name>[A-Za-z_][A-Za-z0-9_]*)[ \t]*:[ \t]*(?<ty>[^;:\r\n]+?)[ \t]*(?::=[ \t]*(?<default>'(?:\$.|[^'$\r\n])*'|[^;\r\n]*?)[ \t]*)?;[ \t]*(?://[ \t]*(?<comment>[^\r\n]*?)|\(\*[ \t]*(?<block>.*?)[ \t]*\*\))?[ \t]*\r?$",
    )
    .expect("Failed to compile member regex")
});

static ARRAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ARRAY\s*\[\s*(?<lower>-?\d+)\s*\.\.\s*(?<upper>-?\d+)\s*\]\s*OF\s+(?<base>.+)$")
        .expect("Failed to compile array regex")
});

/// Keyword table and literal conventions of one structured-text dialect
#[derive(Debug)]
pub(crate) struct StDialect {
    pub vendor: &'static str,
    /// Bijective scalar keyword table
    pub keywords: [(ScalarKind, &'static str); 6],
    pub array_keyword: &'static str,
    pub of_keyword: &'static str,
    pub true_token: &'static str,
    pub false_token: &'static str,
}

impl StDialect {
    pub fn keyword(&self, kind: ScalarKind) -> &'static str {
        self.keywords
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, kw)| *kw)
            .unwrap_or_else(|| kind.into())
    }

    /// Reverse keyword lookup. IEC keywords are case-insensitive.
    pub fn scalar_for(&self, token: &str) -> Option<ScalarKind> {
        self.keywords
            .iter()
            .find(|(_, kw)| kw.eq_ignore_ascii_case(token))
            .map(|(k, _)| *k)
    }

    pub fn encode_type(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Scalar(kind) => self.keyword(*kind).to_string(),
            TypeRef::Array { base, lower, upper } => format!(
                "{}[{}..{}] {} {}",
                self.array_keyword,
                lower,
                upper,
                self.of_keyword,
                self.encode_type(base)
            ),
            TypeRef::Named(name) => name.clone(),
        }
    }

    /// Decode a type token. Unknown tokens pass through as named references.
    pub fn decode_type(&self, token: &str) -> Result<TypeRef, ModelError> {
        let token = token.trim();

        if let Some(captures) = ARRAY_RE.captures(token) {
            let lower = parse_bound(&captures["lower"])?;
            let upper = parse_bound(&captures["upper"])?;
            let base = self.decode_type(&captures["base"])?;
            return TypeRef::array(base, lower, upper);
        }

        match self.scalar_for(token) {
            Some(kind) => Ok(TypeRef::Scalar(kind)),
            None => {
                tracing::debug!("{}: passing through type '{}' as a named reference", self.vendor, token);
                Ok(TypeRef::named(token))
            }
        }
    }

    pub fn format_default(&self, literal: &Literal, type_ref: &TypeRef) -> String {
        match literal {
            Literal::Bool(true) => self.true_token.to_string(),
            Literal::Bool(false) => self.false_token.to_string(),
            Literal::Int(v) => v.to_string(),
            Literal::Real(v) => format_real(*v),
            Literal::Text(text) if type_ref.scalar_kind() == Some(ScalarKind::String) => {
                quote_string(text)
            }
            Literal::Text(text) => text.clone(),
        }
    }

    /// Quoted strings stay text; bare tokens are typed, then the member
    /// constructor coerces them to the member type
    pub fn decode_default(&self, raw: &str) -> Literal {
        let raw = raw.trim();
        if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
            Literal::Text(unquote_string(&raw[1..raw.len() - 1]))
        } else {
            Literal::from_token(raw)
        }
    }

    /// `name : type [:= default];[ // description]`
    pub fn member_line(&self, member: &Member) -> String {
        let default = member
            .default_value
            .as_ref()
            .map(|d| format!(" := {}", self.format_default(d, &member.type_ref)))
            .unwrap_or_default();
        let comment = if member.description.is_empty() {
            String::new()
        } else {
            format!(" // {}", single_line(&member.description))
        };
        format!(
            "{} : {}{};{}",
            member.name,
            self.encode_type(&member.type_ref),
            default,
            comment
        )
    }

    /// `TYPE <name> :` block shared by CODESYS and Beckhoff
    pub fn render_struct(&self, udt: &TypeDefinition, indent: &str) -> String {
        let mut out = format!("TYPE {} :\nSTRUCT\n", udt.name());
        for member in udt.members() {
            out.push_str(indent);
            out.push_str(&self.member_line(member));
            out.push('\n');
        }
        out.push_str("END_STRUCT\nEND_TYPE\n");
        out
    }

    /// Collect every member declaration in `text`, in order
    pub fn parse_members(&self, text: &str) -> Result<Vec<Member>, FormatError> {
        let mut members = Vec::new();

        for captures in MEMBER_RE.captures_iter(text) {
            let name = &captures["name"];
            let type_ref = self
                .decode_type(&captures["ty"])
                .map_err(|e| FormatError::InvalidMember {
                    vendor: self.vendor,
                    member: name.to_string(),
                    reason: e.to_string(),
                })?;
            let default = captures
                .name("default")
                .map(|m| m.as_str().trim())
                .filter(|raw| !raw.is_empty())
                .map(|raw| self.decode_default(raw));
            let description = captures
                .name("comment")
                .or_else(|| captures.name("block"))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();

            members.push(Member::new(name, type_ref, default, description));
        }

        Ok(members)
    }
}

fn parse_bound(raw: &str) -> Result<i64, ModelError> {
    raw.parse()
        .map_err(|_| ModelError::BoundOutOfRange(raw.to_string()))
}

/// IEC string literal, `$` escapes
fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '$' => out.push_str("$$"),
            '\'' => out.push_str("$'"),
            '\n' => out.push_str("$N"),
            '\r' => out.push_str("$R"),
            '\t' => out.push_str("$T"),
            '\x0C' => out.push_str("$P"),
            c if c.is_control() => out.push_str(&format!("${:02X}", c as u32 & 0xFF)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn unquote_string(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('N' | 'n' | 'L' | 'l') => out.push('\n'),
            Some('R' | 'r') => out.push('\r'),
            Some('T' | 't') => out.push('\t'),
            Some('P' | 'p') => out.push('\x0C'),
            Some(escaped) => {
                let hex = (escaped.to_digit(16), chars.peek().and_then(|c| c.to_digit(16)));
                match hex {
                    // `$hh` character code
                    (Some(hi), Some(lo)) => {
                        chars.next();
                        out.push(char::from((hi * 16 + lo) as u8));
                    }
                    _ => out.push(escaped),
                }
            }
            None => out.push('$'),
        }
    }
    out
}

/// Comments are line-based; fold descriptions onto one line
pub(crate) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text safe to place inside a `(* ... *)` comment
pub(crate) fn block_comment(text: &str) -> String {
    single_line(text).replace("*)", "* )")
}
