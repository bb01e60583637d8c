//! Parse reStructuredText field-list docstrings into structured sections.
//!
//! The input is a docstring body using the `:param x:` / `:type x:` /
//! `:returns:` / `:raises:` field-list convention. One parse pass produces
//! an ordered list of [`model::Section`] values (description, parameters,
//! attributes, return value, exceptions) plus a list of human-readable
//! error strings for every recoverable problem found along the way; a bad
//! directive never aborts the parse.
//!
//! Callers that know the documented callable's signature can supply it
//! through [`context::ParseContext`]; signature annotations take
//! precedence over types written in the docstring.
//!
//! ```
//! use rstdoc::{parser, ParseContext};
//!
//! let docstring = "Add two numbers.\n:param x: first addend\n:type x: int\n:returns: the sum";
//! let result = parser::parse(docstring, &ParseContext::default());
//! assert_eq!(result.sections.len(), 3);
//! assert!(result.errors.is_empty());
//! ```

pub mod context;
pub mod model;
pub mod parser;
pub mod render;

pub use context::{ParamSignature, ParseContext, Signature};
pub use model::{AnnotatedObject, Annotation, Attribute, Parameter, Section};
pub use parser::{parse, ParseResult};
