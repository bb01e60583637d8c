//! reStructuredText field-list parser.
//!
//! Scans a docstring line by line, dispatching `:param:`-style field
//! directives to readers and accumulating everything else as description
//! text. Annotations are resolved by merging the caller-supplied signature,
//! inline directive types and separate type directives, in that order of
//! precedence. Recoverable problems never abort the scan; they are
//! collected as human-readable strings and handed back with the sections.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::model::{
    AnnotatedObject, Annotation, Attribute, DefaultValue, ParamKind, Parameter, Section,
};
use crate::parser::directive::{self, Directive, ParsedDirective};

// -- Field registry -----------------------------------------------------------

const PARAM_NAMES: &[&str] = &["param", "parameter", "arg", "argument", "key", "keyword"];
const PARAM_TYPE_NAMES: &[&str] = &["type"];
const ATTRIBUTE_NAMES: &[&str] = &["var", "ivar", "cvar"];
const ATTRIBUTE_TYPE_NAMES: &[&str] = &["vartype"];
const RETURN_NAMES: &[&str] = &["returns", "return"];
const RETURN_TYPE_NAMES: &[&str] = &["rtype"];
const EXCEPTION_NAMES: &[&str] = &["raises", "raise", "except", "exception"];

type FieldReader = fn(&mut Scan<'_>, &[&str], usize) -> usize;

/// Binds a set of directive names to the reader that consumes them.
struct FieldType {
    pattern: Regex,
    read: FieldReader,
}

impl FieldType {
    fn new(names: &[&str], read: FieldReader) -> Self {
        // Prefix match: a line opens with ":<name>" after indentation.
        let pattern = Regex::new(&format!(r"^\s*:(?:{})", names.join("|"))).unwrap();
        Self { pattern, read }
    }

    fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

// Ordering is significant: ":vartype" must be checked before ":var", and
// ":type" before the parameter names, so prefix collisions resolve to the
// typed directive.
static FIELD_TYPES: LazyLock<[FieldType; 7]> = LazyLock::new(|| {
    [
        FieldType::new(PARAM_TYPE_NAMES, read_parameter_type),
        FieldType::new(PARAM_NAMES, read_parameter),
        FieldType::new(ATTRIBUTE_TYPE_NAMES, read_attribute_type),
        FieldType::new(ATTRIBUTE_NAMES, read_attribute),
        FieldType::new(EXCEPTION_NAMES, read_exception),
        FieldType::new(RETURN_NAMES, read_return),
        FieldType::new(RETURN_TYPE_NAMES, read_return_type),
    ]
});

// -- Public API ---------------------------------------------------------------

/// Everything produced by one parse: ordered sections plus every
/// recoverable problem encountered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub sections: Vec<Section>,
    pub errors: Vec<String>,
}

/// Parse a docstring into ordered sections.
///
/// The scan is a single bounded pass; one bad directive is reported and
/// skipped without stopping the rest of the docstring from being
/// processed.
pub fn parse(docstring: &str, context: &ParseContext) -> ParseResult {
    let mut scan = Scan::new(context);
    let lines: Vec<&str> = docstring.split('\n').collect();

    let mut curr_line_index = 0;
    while curr_line_index < lines.len() {
        let line = lines[curr_line_index];
        match FIELD_TYPES.iter().find(|field_type| field_type.matches(line)) {
            Some(field_type) => {
                curr_line_index = (field_type.read)(&mut scan, &lines, curr_line_index);
            }
            None => scan.append_description(line),
        }
        curr_line_index += 1;
    }

    scan.finish()
}

// -- Scan state ---------------------------------------------------------------

/// Values accumulated from the docstring before section assembly.
///
/// Parameter and attribute vecs double as the insertion-order record;
/// lookups are linear but stay docstring-sized. The `*_types` maps stage
/// type directives that may arrive before or after the directive they
/// describe.
#[derive(Default)]
struct ParsedValues {
    description: Vec<String>,
    parameters: Vec<Parameter>,
    param_types: HashMap<String, String>,
    attributes: Vec<Attribute>,
    attribute_types: HashMap<String, String>,
    exceptions: Vec<AnnotatedObject>,
    return_value: Option<AnnotatedObject>,
    return_type: Option<String>,
}

/// Mutable state for one parse invocation. Constructed fresh per call so
/// nothing leaks between parses.
struct Scan<'a> {
    context: &'a ParseContext,
    values: ParsedValues,
    errors: Vec<String>,
}

impl<'a> Scan<'a> {
    fn new(context: &'a ParseContext) -> Self {
        Self {
            context,
            values: ParsedValues::default(),
            errors: Vec::new(),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Read one directive, recording a malformed-directive error on
    /// failure. The `Err` carries the index to resume at.
    fn directive(&mut self, lines: &[&str], start_index: usize) -> Result<Directive, usize> {
        match directive::parse_directive(lines, start_index) {
            ParsedDirective::Parsed(directive) => Ok(directive),
            ParsedDirective::Failed { line, next_index } => {
                self.error(format!("failed to get ':directive: value' pair from '{line}'"));
                Err(next_index)
            }
        }
    }

    fn append_description(&mut self, line: &str) {
        self.values.description.push(line.to_string());
    }

    /// Annotation precedence: signature annotation, then the inline
    /// directive type, then a separate ":type:" directive, then empty.
    /// Inline and separate types together are a conflict; both still
    /// resolve, the error is recorded on top.
    fn determine_param_annotation(
        &mut self,
        name: &str,
        directive_type: Option<&str>,
    ) -> Annotation {
        let mut annotation = Annotation::Empty;

        let parsed_param_type = self.values.param_types.get(name).cloned();
        if let Some(param_type) = &parsed_param_type {
            annotation = Annotation::Type(param_type.clone());
        }
        if let Some(directive_type) = directive_type {
            annotation = Annotation::Type(directive_type.to_string());
        }
        if directive_type.is_some() && parsed_param_type.is_some() {
            self.error(format!("duplicate parameter information for '{name}'"));
        }

        if let Some(signature) = &self.context.signature {
            match signature.parameter(name) {
                None => self.error(format!("no matching parameter for '{name}'")),
                Some(param_signature) => {
                    if let Annotation::Type(expr) = &param_signature.annotation {
                        annotation = Annotation::Type(expr.clone());
                    }
                }
            }
        }

        annotation
    }

    fn determine_param_details(&self, name: &str) -> (DefaultValue, ParamKind) {
        let mut default = DefaultValue::Unset;
        let mut kind = ParamKind::Unknown;

        if let Some(signature) = &self.context.signature {
            // a missing parameter is already reported by
            // determine_param_annotation()
            if let Some(param_signature) = signature.parameter(name) {
                if let DefaultValue::Value(value) = &param_signature.default {
                    default = DefaultValue::Value(value.clone());
                }
                kind = param_signature.kind;
            }
        }

        (default, kind)
    }

    // -- Section assembly -----------------------------------------------------

    fn finish(mut self) -> ParseResult {
        let markdown = self.dedent_description().join("\n");

        let mut sections = Vec::new();
        if !markdown.is_empty() {
            sections.push(Section::Markdown(markdown));
        }
        if !self.values.parameters.is_empty() {
            sections.push(Section::Parameters(std::mem::take(
                &mut self.values.parameters,
            )));
        }
        if !self.values.attributes.is_empty() {
            sections.push(Section::Attributes(std::mem::take(
                &mut self.values.attributes,
            )));
        }
        if let Some(return_value) = self.values.return_value.take() {
            sections.push(Section::Return(return_value));
        }
        if !self.values.exceptions.is_empty() {
            sections.push(Section::Exceptions(std::mem::take(
                &mut self.values.exceptions,
            )));
        }

        ParseResult {
            sections,
            errors: self.errors,
        }
    }

    /// Strip the indentation of the first non-empty description line from
    /// the whole block. Lines without that indent are kept as-is and
    /// reported; blank lines pass through, they carry no indent to strip.
    fn dedent_description(&mut self) -> Vec<String> {
        let lines = std::mem::take(&mut self.values.description);
        let Some(first_line) = lines.iter().find(|line| !line.trim().is_empty()) else {
            return lines;
        };

        let initial_indent = first_line.len() - first_line.trim_start().len();
        if initial_indent == 0 {
            return lines;
        }
        let indent_spaces = " ".repeat(initial_indent);

        let mut result = Vec::with_capacity(lines.len());
        for line in lines {
            if line.starts_with(&indent_spaces) {
                result.push(line[initial_indent..].to_string());
            } else if line.trim().is_empty() {
                result.push(line);
            } else {
                self.error("description line didn't have a matching indent");
                result.push(line);
            }
        }
        result
    }
}

// -- Field readers ------------------------------------------------------------

fn read_parameter(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };

    let (directive_type, name) = match directive.parts.as_slice() {
        [_, name] => (None, name.clone()),
        [_, directive_type, name] => (Some(directive_type.as_str()), name.clone()),
        _ => {
            scan.error(format!(
                "failed to parse field directive from '{}'",
                directive.line
            ));
            return directive.next_index;
        }
    };

    if scan.values.parameters.iter().any(|param| param.name == name) {
        scan.error(format!("duplicate parameter entry for '{name}'"));
        return directive.next_index;
    }

    let annotation = scan.determine_param_annotation(&name, directive_type);
    let (default, kind) = scan.determine_param_details(&name);

    scan.values.parameters.push(Parameter {
        name,
        annotation,
        description: directive.value,
        default,
        kind,
    });

    directive.next_index
}

fn read_parameter_type(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };
    let param_type = directive::consolidate_descriptive_type(&directive.value);

    let param_name = match directive.parts.as_slice() {
        [_, name] => name.clone(),
        _ => {
            scan.error(format!(
                "failed to get parameter name from '{}'",
                directive.line
            ));
            return directive.next_index;
        }
    };

    // Staged unconditionally: the ":param:" directive may not have been
    // seen yet.
    scan.values
        .param_types
        .insert(param_name.clone(), param_type.clone());
    if let Some(param) = scan
        .values
        .parameters
        .iter_mut()
        .find(|param| param.name == param_name)
    {
        if param.annotation.is_empty() {
            param.annotation = Annotation::Type(param_type);
        } else {
            scan.error(format!("duplicate parameter information for '{param_name}'"));
        }
    }
    directive.next_index
}

fn read_attribute(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };

    let name = match directive.parts.as_slice() {
        [_, name] => name.clone(),
        _ => {
            scan.error(format!(
                "failed to parse field directive from '{}'",
                directive.line
            ));
            return directive.next_index;
        }
    };

    // Annotation precedence: externally supplied annotation, then a
    // separate ":vartype:" directive, then empty.
    let mut annotation = Annotation::Empty;
    if let Some(attribute_type) = scan.values.attribute_types.get(&name) {
        annotation = Annotation::Type(attribute_type.clone());
    }
    if let Some(Annotation::Type(expr)) = scan.context.attributes.get(&name) {
        annotation = Annotation::Type(expr.clone());
    }

    if scan.values.attributes.iter().any(|attr| attr.name == name) {
        scan.error(format!("duplicate attribute entry for '{name}'"));
    } else {
        scan.values.attributes.push(Attribute {
            name,
            annotation,
            description: directive.value,
        });
    }

    directive.next_index
}

fn read_attribute_type(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };
    let attribute_type = directive::consolidate_descriptive_type(&directive.value);

    let attribute_name = match directive.parts.as_slice() {
        [_, name] => name.clone(),
        _ => {
            scan.error(format!(
                "failed to get attribute name from '{}'",
                directive.line
            ));
            return directive.next_index;
        }
    };

    scan.values
        .attribute_types
        .insert(attribute_name.clone(), attribute_type.clone());
    if let Some(attribute) = scan
        .values
        .attributes
        .iter_mut()
        .find(|attr| attr.name == attribute_name)
    {
        if attribute.annotation.is_empty() {
            attribute.annotation = Annotation::Type(attribute_type);
        } else {
            scan.error(format!(
                "duplicate attribute information for '{attribute_name}'"
            ));
        }
    }
    directive.next_index
}

fn read_exception(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };

    // Repeated exception types are all kept, in order of appearance.
    match directive.parts.as_slice() {
        [_, exception_type] => {
            scan.values.exceptions.push(AnnotatedObject {
                annotation: Annotation::Type(exception_type.clone()),
                description: directive.value,
            });
        }
        _ => {
            scan.error(format!(
                "failed to parse exception directive from '{}'",
                directive.line
            ));
        }
    }

    directive.next_index
}

fn read_return(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };

    // Annotation precedence: signature return annotation, then a
    // previously seen ":rtype:", then the declared type from the context.
    let annotation = match &scan.context.signature {
        Some(signature) if !signature.return_annotation.is_empty() => {
            signature.return_annotation.clone()
        }
        _ => match &scan.values.return_type {
            Some(return_type) => Annotation::Type(return_type.clone()),
            None => scan.context.declared_type.clone(),
        },
    };

    // A repeated ":returns:" replaces the previous value without complaint.
    scan.values.return_value = Some(AnnotatedObject {
        annotation,
        description: directive.value,
    });

    directive.next_index
}

fn read_return_type(scan: &mut Scan, lines: &[&str], start_index: usize) -> usize {
    let directive = match scan.directive(lines, start_index) {
        Ok(directive) => directive,
        Err(next_index) => return next_index,
    };

    let return_type = directive::consolidate_descriptive_type(&directive.value);
    scan.values.return_type = Some(return_type.clone());
    if let Some(return_value) = &mut scan.values.return_value {
        if return_value.annotation.is_empty() {
            return_value.annotation = Annotation::Type(return_type);
        } else {
            scan.error("duplicate type information for return");
        }
    }

    directive.next_index
}
