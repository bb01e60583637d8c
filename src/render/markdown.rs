//! Markdown renderer.
//!
//! Description text passes through verbatim; the structured sections
//! render as `##` blocks with one bullet per entry.

use crate::model::{AnnotatedObject, Annotation, Attribute, DefaultValue, Parameter, Section};
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, sections: &[Section]) -> String {
        let mut blocks: Vec<String> = Vec::new();

        for section in sections {
            match section {
                Section::Markdown(text) => blocks.push(text.clone()),
                Section::Parameters(params) => blocks.push(render_parameters(params)),
                Section::Attributes(attributes) => blocks.push(render_attributes(attributes)),
                Section::Return(return_value) => blocks.push(render_return(return_value)),
                Section::Exceptions(exceptions) => blocks.push(render_exceptions(exceptions)),
            }
        }

        let mut output = blocks.join("\n\n");
        if !output.is_empty() {
            output.push('\n');
        }
        output
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_parameters(params: &[Parameter]) -> String {
    let mut lines = vec!["## Parameters".to_string(), String::new()];
    for param in params {
        lines.push(render_parameter(param));
    }
    lines.join("\n")
}

/// `* **x** (`int`): desc` with the default appended when the signature
/// supplied one.
fn render_parameter(param: &Parameter) -> String {
    let mut qualifiers: Vec<String> = Vec::new();
    if let Annotation::Type(expr) = &param.annotation {
        qualifiers.push(format!("`{expr}`"));
    }
    if let DefaultValue::Value(value) = &param.default {
        qualifiers.push(format!("default `{value}`"));
    }

    if qualifiers.is_empty() {
        format!("* **{}**: {}", param.name, param.description)
    } else {
        format!(
            "* **{}** ({}): {}",
            param.name,
            qualifiers.join(", "),
            param.description
        )
    }
}

fn render_attributes(attributes: &[Attribute]) -> String {
    let mut lines = vec!["## Attributes".to_string(), String::new()];
    for attribute in attributes {
        lines.push(match &attribute.annotation {
            Annotation::Type(expr) => {
                format!("* **{}** (`{}`): {}", attribute.name, expr, attribute.description)
            }
            Annotation::Empty => format!("* **{}**: {}", attribute.name, attribute.description),
        });
    }
    lines.join("\n")
}

fn render_return(return_value: &AnnotatedObject) -> String {
    let mut lines = vec!["## Returns".to_string(), String::new()];
    lines.push(match &return_value.annotation {
        Annotation::Type(expr) => format!("`{}`: {}", expr, return_value.description),
        Annotation::Empty => return_value.description.clone(),
    });
    lines.join("\n")
}

fn render_exceptions(exceptions: &[AnnotatedObject]) -> String {
    let mut lines = vec!["## Raises".to_string(), String::new()];
    for exception in exceptions {
        lines.push(match &exception.annotation {
            Annotation::Type(expr) => format!("* **{}**: {}", expr, exception.description),
            Annotation::Empty => format!("* {}", exception.description),
        });
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParamKind;

    fn param(name: &str, annotation: Annotation, description: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            annotation,
            description: description.to_string(),
            default: DefaultValue::Unset,
            kind: ParamKind::Unknown,
        }
    }

    #[test]
    fn parameter_with_type() {
        assert_eq!(
            render_parameter(&param("x", Annotation::Type("int".into()), "the value")),
            "* **x** (`int`): the value"
        );
    }

    #[test]
    fn parameter_without_type() {
        assert_eq!(
            render_parameter(&param("x", Annotation::Empty, "the value")),
            "* **x**: the value"
        );
    }

    #[test]
    fn parameter_with_default() {
        let mut p = param("x", Annotation::Type("int".into()), "the value");
        p.default = DefaultValue::Value("0".into());
        assert_eq!(
            render_parameter(&p),
            "* **x** (`int`, default `0`): the value"
        );
    }

    #[test]
    fn full_document() {
        let sections = vec![
            Section::Markdown("A summary.".to_string()),
            Section::Parameters(vec![param("x", Annotation::Type("int".into()), "the value")]),
            Section::Return(AnnotatedObject {
                annotation: Annotation::Type("str".into()),
                description: "the result".to_string(),
            }),
            Section::Exceptions(vec![AnnotatedObject {
                annotation: Annotation::Type("ValueError".into()),
                description: "on bad input".to_string(),
            }]),
        ];
        let out = MarkdownRenderer.render(&sections);
        assert_eq!(
            out,
            "A summary.\n\n\
             ## Parameters\n\n\
             * **x** (`int`): the value\n\n\
             ## Returns\n\n\
             `str`: the result\n\n\
             ## Raises\n\n\
             * **ValueError**: on bad input\n"
        );
    }

    #[test]
    fn empty_sections_render_empty() {
        assert_eq!(MarkdownRenderer.render(&[]), "");
    }
}
