use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Canonical array spelling: `ARRAY[lo..hi] OF <base>`
static ARRAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ARRAY\s*\[\s*(?<lower>-?\d+)\s*\.\.\s*(?<upper>-?\d+)\s*\]\s*OF\s+(?<base>.+)$")
        .expect("Failed to compile array regex")
});

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Failed to compile identifier regex")
});

/// Check a UDT or member name against the identifier rule
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Errors raised while building canonical values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Upper bound lies below lower bound
    #[error("Invalid array bounds [{lower}..{upper}]: upper bound is below lower bound")]
    InvalidArrayBounds { lower: i64, upper: i64 },

    /// Bound does not fit a 64-bit integer
    #[error("Array bound out of range: {0}")]
    BoundOutOfRange(String),
}

/// The six canonical scalar kinds
#[derive(
    AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq,
    Hash,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ScalarKind {
    Bool,
    Int,
    Dint,
    Lint,
    Real,
    String,
}

impl ScalarKind {
    /// Integer kinds (INT, DINT, LINT)
    pub fn is_integer(&self) -> bool {
        matches!(self, ScalarKind::Int | ScalarKind::Dint | ScalarKind::Lint)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || *self == ScalarKind::Real
    }
}

/// Reference to a member's data type
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(ScalarKind),
    Array {
        base: Box<TypeRef>,
        lower: i64,
        upper: i64,
    },
    /// Unresolved reference to another UDT, never expanded in place
    Named(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Build an array reference, enforcing `upper >= lower`
    pub fn array(base: TypeRef, lower: i64, upper: i64) -> Result<Self, ModelError> {
        if upper < lower {
            return Err(ModelError::InvalidArrayBounds { lower, upper });
        }
        Ok(TypeRef::Array {
            base: Box::new(base),
            lower,
            upper,
        })
    }

    /// Build a zero-based array holding `size` elements
    pub fn array_of_size(base: TypeRef, size: u64) -> Result<Self, ModelError> {
        let upper = i64::try_from(size)
            .map_err(|_| ModelError::BoundOutOfRange(size.to_string()))?
            - 1;
        Self::array(base, 0, upper)
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeRef::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    /// Number of elements for an array reference. `None` when the count
    /// does not fit a `u64` (the full `i64` range).
    pub fn element_count(&self) -> Option<u64> {
        match self {
            TypeRef::Array { lower, upper, .. } => upper.abs_diff(*lower).checked_add(1),
            _ => None,
        }
    }
}

impl From<ScalarKind> for TypeRef {
    fn from(kind: ScalarKind) -> Self {
        TypeRef::Scalar(kind)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => write!(f, "{}", kind),
            TypeRef::Array { base, lower, upper } => {
                write!(f, "ARRAY[{}..{}] OF {}", lower, upper, base)
            }
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeRef {
    type Err = ModelError;

    /// Parse the canonical spelling. Anything that is neither a scalar keyword
    /// nor an array becomes a named reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(captures) = ARRAY_RE.captures(s) {
            let lower = parse_bound(&captures["lower"])?;
            let upper = parse_bound(&captures["upper"])?;
            let base = captures["base"].parse::<TypeRef>()?;
            return TypeRef::array(base, lower, upper);
        }

        match ScalarKind::from_str(s) {
            Ok(kind) => Ok(TypeRef::Scalar(kind)),
            Err(_) => Ok(TypeRef::Named(s.to_string())),
        }
    }
}

fn parse_bound(raw: &str) -> Result<i64, ModelError> {
    raw.parse()
        .map_err(|_| ModelError::BoundOutOfRange(raw.to_string()))
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Typed default value of a member
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl Literal {
    /// Type a bare token: `TRUE`/`FALSE`, then integer, then finite real.
    /// Anything else stays text.
    pub fn from_token(raw: &str) -> Literal {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            return Literal::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Literal::Bool(false);
        }
        if let Ok(v) = raw.parse::<i64>() {
            return Literal::Int(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Literal::Real(v),
            _ => Literal::Text(raw.to_string()),
        }
    }

    /// Coerce the literal to the member's type. STRING members hold text;
    /// every other type reads text as a bare token, and REAL widens integers.
    pub fn coerce_to(self, type_ref: &TypeRef) -> Literal {
        let kind = type_ref.scalar_kind();

        if kind == Some(ScalarKind::String) {
            return match self {
                Literal::Text(text) => Literal::Text(text),
                other => Literal::Text(other.to_string()),
            };
        }

        let typed = match self {
            Literal::Text(text) => Literal::from_token(&text),
            other => other,
        };
        match (kind, typed) {
            (Some(ScalarKind::Real), Literal::Int(v)) => Literal::Real(v as f64),
            (_, other) => other,
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Literal::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Real(v) => f.write_str(&format_real(*v)),
            Literal::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Real(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Text(v.to_string())
    }
}

/// Reals always carry a decimal point so they read back as reals
pub(crate) fn format_real(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// A single UDT member
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(rename = "default")]
    pub default_value: Option<Literal>,
    pub description: String,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
        default_value: Option<Literal>,
        description: impl Into<String>,
    ) -> Self {
        let type_ref = type_ref.into();
        // A blank token is no default outside STRING
        let default_value = default_value
            .map(|d| d.coerce_to(&type_ref))
            .filter(|d| type_ref.scalar_kind() == Some(ScalarKind::String) || !d.is_blank_text());
        Self {
            name: name.into(),
            type_ref,
            default_value,
            description: description.into(),
        }
    }
}

/// Vendor-neutral user-defined type
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeDefinition {
    name: String,
    description: String,
    members: Vec<Member>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            members: Vec::new(),
        }
    }

    /// Append a member. A member with the same name is replaced in place.
    pub fn with_member(
        self,
        name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
        default_value: Option<Literal>,
        description: impl Into<String>,
    ) -> Self {
        self.push_member(Member::new(name, type_ref, default_value, description))
    }

    pub fn push_member(mut self, member: Member) -> Self {
        match self.members.iter_mut().find(|m| m.name == member.name) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
        self
    }

    /// Same definition under another name
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Members in declaration order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}
