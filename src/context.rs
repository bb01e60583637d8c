//! Caller-supplied metadata merged into parsed docstrings.
//!
//! Signature extraction is out of scope here: the surrounding pipeline
//! inspects the documented callable and hands the result over as a
//! [`ParseContext`] snapshot, read-only for the duration of one parse.

use std::collections::HashMap;

use crate::model::{Annotation, DefaultValue, ParamKind};

/// Externally inspected signature of the documented callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub parameters: HashMap<String, ParamSignature>,
    pub return_annotation: Annotation,
}

impl Signature {
    /// Look up a parameter, ignoring leading `*`/`**` variadic markers so
    /// `:param *args:` and `:param **kwargs:` resolve.
    pub fn parameter(&self, name: &str) -> Option<&ParamSignature> {
        self.parameters.get(name.trim_start_matches('*'))
    }
}

/// Signature details for a single parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSignature {
    pub annotation: Annotation,
    pub default: DefaultValue,
    pub kind: ParamKind,
}

/// Read-only view over everything the caller knows about the documented
/// object. Created fresh for each parse call, discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseContext {
    /// Signature of the documented callable, when one could be inspected.
    pub signature: Option<Signature>,
    /// Declared type of the documented object, used as a return-annotation
    /// fallback when neither the signature nor `:rtype:` supplies one.
    pub declared_type: Annotation,
    /// Externally known attribute annotations, by attribute name.
    pub attributes: HashMap<String, Annotation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_lookup_strips_variadic_markers() {
        let mut parameters = HashMap::new();
        parameters.insert(
            "args".to_string(),
            ParamSignature {
                kind: ParamKind::VarPositional,
                ..Default::default()
            },
        );
        parameters.insert(
            "kwargs".to_string(),
            ParamSignature {
                kind: ParamKind::VarKeyword,
                ..Default::default()
            },
        );
        let signature = Signature {
            parameters,
            return_annotation: Annotation::Empty,
        };

        assert_eq!(
            signature.parameter("*args").map(|p| p.kind),
            Some(ParamKind::VarPositional)
        );
        assert_eq!(
            signature.parameter("**kwargs").map(|p| p.kind),
            Some(ParamKind::VarKeyword)
        );
        assert!(signature.parameter("missing").is_none());
    }
}
