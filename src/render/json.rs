//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the section list directly, for custom rendering pipelines
//! and IDE integration.

use crate::model::Section;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, sections: &[Section]) -> String {
        // The model derives Serialize with no fallible representations,
        // so serialization cannot fail.
        let mut out = serde_json::to_string_pretty(sections).expect("sections serialize");
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotatedObject, Annotation};

    #[test]
    fn renders_tagged_sections() {
        let sections = vec![
            Section::Markdown("summary".to_string()),
            Section::Return(AnnotatedObject {
                annotation: Annotation::Type("int".to_string()),
                description: "the result".to_string(),
            }),
        ];
        let out = JsonRenderer.render(&sections);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["kind"], "markdown");
        assert_eq!(parsed[0]["value"], "summary");
        assert_eq!(parsed[1]["kind"], "return");
        assert_eq!(parsed[1]["value"]["annotation"], "int");
    }

    #[test]
    fn empty_annotation_is_null() {
        let sections = vec![Section::Return(AnnotatedObject {
            annotation: Annotation::Empty,
            description: "something".to_string(),
        })];
        let out = JsonRenderer.render(&sections);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed[0]["value"]["annotation"].is_null());
    }
}
