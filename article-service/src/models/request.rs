use serde::Deserialize;

/// Placeholder rendered into the prompt for fields the form did not send.
/// The blog frontend has always interpolated absent fields this way, so
/// the upstream model already knows how to cope with it.
const UNDEFINED: &str = "undefined";

/// The blog form's generation parameters.
///
/// Every field is optional from the caller's perspective; nothing is
/// validated for type or range. Text fields that are absent render as the
/// literal string `"undefined"` in the prompt, booleans default to false.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    pub keywords: Option<String>,
    pub article_topic: Option<String>,
    pub search_intent: Option<String>,
    pub word_count: Option<u32>,
    pub language: Option<String>,
    pub tone_style: Option<String>,
    pub external_links: bool,
    pub editing_outline: bool,
    /// Advisory only: the upstream model has no live internet access.
    pub realtime_knowledge: bool,
}

impl GenerationRequest {
    pub fn keywords_text(&self) -> &str {
        text_or_undefined(&self.keywords)
    }

    pub fn article_topic_text(&self) -> &str {
        text_or_undefined(&self.article_topic)
    }

    pub fn search_intent_text(&self) -> &str {
        text_or_undefined(&self.search_intent)
    }

    pub fn word_count_text(&self) -> String {
        match self.word_count {
            Some(count) => count.to_string(),
            None => UNDEFINED.to_string(),
        }
    }

    pub fn language_text(&self) -> &str {
        text_or_undefined(&self.language)
    }

    pub fn tone_style_text(&self) -> &str {
        text_or_undefined(&self.tone_style)
    }
}

fn text_or_undefined(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(UNDEFINED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_render_as_undefined() {
        let request = GenerationRequest::default();

        assert_eq!(request.keywords_text(), "undefined");
        assert_eq!(request.word_count_text(), "undefined");
        assert!(!request.external_links);
        assert!(!request.editing_outline);
        assert!(!request.realtime_knowledge);
    }

    #[test]
    fn deserializes_camel_case_body() {
        let body = serde_json::json!({
            "keywords": "rust, axum",
            "articleTopic": "Web services",
            "searchIntent": "informational",
            "wordCount": 800,
            "language": "English",
            "toneStyle": "formal",
            "externalLinks": true,
            "editingOutline": false,
            "realtimeKnowledge": true
        });

        let request: GenerationRequest = serde_json::from_value(body).unwrap();

        assert_eq!(request.keywords_text(), "rust, axum");
        assert_eq!(request.article_topic_text(), "Web services");
        assert_eq!(request.word_count_text(), "800");
        assert!(request.external_links);
        assert!(request.realtime_knowledge);
    }

    #[test]
    fn empty_body_deserializes_with_defaults() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.language_text(), "undefined");
        assert_eq!(request.tone_style_text(), "undefined");
    }
}
