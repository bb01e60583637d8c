//! Data model for parsed docstrings, format-agnostic.

use serde::{Serialize, Serializer};

/// Type expression attached to a parameter, attribute or return value.
///
/// `Empty` means no source (signature, inline type, type directive)
/// supplied any information. Kept as its own variant rather than an
/// `Option<String>` so an absent annotation can never alias an empty
/// expression when values cross component boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Annotation {
    #[default]
    Empty,
    Type(String),
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        matches!(self, Annotation::Empty)
    }

    /// The type expression, if one is present.
    pub fn as_type(&self) -> Option<&str> {
        match self {
            Annotation::Empty => None,
            Annotation::Type(expr) => Some(expr),
        }
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Annotation::Empty => serializer.serialize_none(),
            Annotation::Type(expr) => serializer.serialize_str(expr),
        }
    }
}

/// Default value of a parameter, as reported by the signature.
///
/// `Unset` covers both "the signature declares no default" and "no
/// signature was supplied"; it is distinct from a declared default of `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultValue {
    #[default]
    Unset,
    Value(String),
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DefaultValue::Unset => serializer.serialize_none(),
            DefaultValue::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// How a parameter is passed, as reported by the signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Positional,
    PositionalOrKeyword,
    KeywordOnly,
    VarPositional,
    VarKeyword,
    /// No signature available for this parameter.
    #[default]
    Unknown,
}

/// A documented parameter, from `:param name:` and friends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub annotation: Annotation,
    pub description: String,
    pub default: DefaultValue,
    pub kind: ParamKind,
}

/// A documented attribute, from `:var name:` / `:ivar:` / `:cvar:`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub annotation: Annotation,
    pub description: String,
}

/// An (annotation, description) pair: one raised exception, or the
/// return value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedObject {
    pub annotation: Annotation,
    pub description: String,
}

/// One typed chunk of parser output.
///
/// Sections are emitted in this declaration order, and a section with no
/// content is omitted entirely. Parameter and attribute lists keep the
/// order the names first appeared in the docstring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Section {
    Markdown(String),
    Parameters(Vec<Parameter>),
    Attributes(Vec<Attribute>),
    Return(AnnotatedObject),
    Exceptions(Vec<AnnotatedObject>),
}
