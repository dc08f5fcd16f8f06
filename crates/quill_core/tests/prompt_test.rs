//! Tests for topic sanitization and prompt formatting.

use quill_core::{
    GenerationRequest, NO_TOPIC, PromptTemplate, Role, TOPIC_PLACEHOLDER, format_prompt,
    sanitize_topic,
};

const TOPICS: &[&str] = &[
    "Next.js",
    "",
    "rust\u{0}\u{1f}\u{7f}\u{9f}",
    "{{topic}}",
    "{{{{topic}}topic}}",
    "multi\nline\ttopic",
    "émoji 🚀 and ünïcode",
    "literal \\n escape",
    "{{topic",
    "topic}}",
    "topic",
    "{{",
    "}}",
];

#[test]
fn test_formatter_never_leaves_placeholder() {
    let templates = [
        "{{topic}}",
        "Write about {{topic}}.\\nThen {{topic}} again.",
        "{{topic}}{{topic}}{{topic}}",
        "Prefix only {{topic}}",
        "{{topic}}}}",
        "{{{{topic}}",
        "{{{{topic}}}}",
        "{{topic}}topic}}",
    ];
    for template in templates {
        let template = PromptTemplate::new(template).unwrap();
        for topic in TOPICS {
            let prompt = template.format(&sanitize_topic(topic));
            assert!(
                !prompt.contains(TOPIC_PLACEHOLDER),
                "placeholder left for topic {:?}: {:?}",
                topic,
                prompt
            );
        }
    }
}

#[test]
fn test_formatter_blocks_placeholder_across_topic_boundary() {
    let template = PromptTemplate::new("{{topic}}}}").unwrap();
    assert_eq!(template.format("{{topic"), "");

    let template = PromptTemplate::new("Say {{{{topic}}}} now").unwrap();
    assert_eq!(template.format("topic"), "Say  now");
    assert_eq!(template.format("Rust"), "Say {{Rust}} now");
}

#[test]
fn test_formatter_replaces_every_occurrence() {
    let prompt = format_prompt(Some("{{topic}} / {{topic}}"), "Rust").unwrap();
    assert_eq!(prompt, "Rust / Rust");
}

#[test]
fn test_formatter_converts_escaped_newlines() {
    let prompt = format_prompt(Some("Line one\\nLine two about {{topic}}"), "Go").unwrap();
    assert_eq!(prompt, "Line one\nLine two about Go");
}

#[test]
fn test_formatter_keeps_topic_escapes_literal() {
    let prompt = format_prompt(Some("About {{topic}}"), "a\\nb").unwrap();
    assert_eq!(prompt, "About a\\nb");
}

#[test]
fn test_formatter_rejects_missing_or_empty_template() {
    assert!(format_prompt(None, "Rust").is_err());
    assert!(format_prompt(Some(""), "Rust").is_err());
    assert!(format_prompt(Some("   \n"), "Rust").is_err());
}

#[test]
fn test_template_without_placeholder_is_accepted() {
    let template = PromptTemplate::new("Write anything").unwrap();
    assert_eq!(template.format("Rust"), "Write anything");
}

#[test]
fn test_sanitizer_strips_exactly_control_ranges() {
    let all: String = (0u32..=0x2ff).filter_map(char::from_u32).collect();
    let sanitized = sanitize_topic(&all);

    let expected: String = all
        .chars()
        .filter(|c| {
            let code = *c as u32;
            !(code <= 0x1f || (0x7f..=0x9f).contains(&code))
        })
        .collect();

    assert_eq!(sanitized, expected);
    assert!(sanitized.starts_with(' '));
    assert!(sanitized.contains('~'));
    assert!(sanitized.contains('\u{a0}'));
}

#[test]
fn test_sanitizer_preserves_order() {
    assert_eq!(sanitize_topic("a\u{1}b\u{85}c\u{7f}d"), "abcd");
    assert_eq!(sanitize_topic("こんにちは\u{0}世界"), "こんにちは世界");
}

#[test]
fn test_sanitizer_substitutes_empty_topic() {
    assert_eq!(sanitize_topic(""), NO_TOPIC);
}

#[test]
fn test_generation_request_builds_single_user_message() {
    let request = GenerationRequest::new(
        "Next.js\u{1b}",
        "Write about {{topic}}",
        "claude-3-5-sonnet-20241022",
        4000,
    );
    let completion = request.completion_request().unwrap();

    assert_eq!(completion.model(), "claude-3-5-sonnet-20241022");
    assert_eq!(*completion.max_tokens(), 4000);
    assert_eq!(completion.messages().len(), 1);
    assert_eq!(completion.messages()[0].role, Role::User);
    assert_eq!(completion.messages()[0].content, "Write about Next.js");
}

#[test]
fn test_generation_request_requires_model() {
    let request = GenerationRequest::new("Rust", "Write about {{topic}}", "", 4000);
    let err = request.completion_request().unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_generation_request_requires_template() {
    let request = GenerationRequest::new("Rust", "", "claude", 4000);
    let err = request.completion_request().unwrap_err();
    assert!(err.is_config());
}
