//! Prompt formatting.

use quill_error::ConfigError;
use std::sync::Arc;

/// Placeholder substituted with the sanitized topic.
pub const TOPIC_PLACEHOLDER: &str = "{{topic}}";

/// A validated prompt template containing the topic placeholder.
///
/// Templates are stored with literal `\n` escape sequences already turned
/// into newlines, so templates read from single-line environment variables
/// format the same as templates read from TOML.
///
/// # Examples
///
/// ```
/// use quill_core::PromptTemplate;
///
/// let template = PromptTemplate::new("Write about {{topic}}.\\nUse TITLE:").unwrap();
/// assert_eq!(template.format("Rust"), "Write about Rust.\nUse TITLE:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: Arc<str>,
}

impl PromptTemplate {
    /// Validate and store a template.
    ///
    /// Fails when the template is empty or whitespace. A template without the
    /// placeholder is accepted with a warning, since every topic then yields
    /// the same prompt.
    #[track_caller]
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if template.trim().is_empty() {
            return Err(ConfigError::new("Prompt template is empty"));
        }
        if !template.contains(TOPIC_PLACEHOLDER) {
            tracing::warn!(
                placeholder = TOPIC_PLACEHOLDER,
                "Prompt template has no topic placeholder"
            );
        }
        let unescaped = template.replace("\\n", "\n");
        Ok(Self {
            template: Arc::from(unescaped),
        })
    }

    /// Template text with escapes already resolved.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute every placeholder occurrence with `topic`.
    ///
    /// The topic is inserted verbatim apart from any embedded placeholder
    /// tokens, which are removed. Braces in the topic can still join with
    /// braces in the template to spell a placeholder; those are removed from
    /// the result too, so the output never contains one.
    pub fn format(&self, topic: &str) -> String {
        let topic = strip_placeholders(topic.to_string());
        let formatted = self.template.replace(TOPIC_PLACEHOLDER, &topic);
        if formatted.contains(TOPIC_PLACEHOLDER) {
            tracing::debug!("Removing placeholder formed across the topic boundary");
        }
        strip_placeholders(formatted)
    }
}

/// Remove placeholder tokens until none remain.
///
/// Each pass shortens the text, so this terminates.
fn strip_placeholders(mut text: String) -> String {
    while text.contains(TOPIC_PLACEHOLDER) {
        text = text.replace(TOPIC_PLACEHOLDER, "");
    }
    text
}

/// Format a prompt from an optional template.
///
/// Fails with a configuration error when the template is absent or empty.
///
/// # Examples
///
/// ```
/// use quill_core::format_prompt;
///
/// let prompt = format_prompt(Some("{{topic}} and {{topic}}"), "tea").unwrap();
/// assert_eq!(prompt, "tea and tea");
/// assert!(format_prompt(None, "tea").is_err());
/// ```
#[track_caller]
pub fn format_prompt(template: Option<&str>, topic: &str) -> Result<String, ConfigError> {
    match template {
        Some(template) => Ok(PromptTemplate::new(template)?.format(topic)),
        None => Err(ConfigError::new("Prompt template is not configured")),
    }
}
