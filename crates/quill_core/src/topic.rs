//! Topic sanitization and slug helpers.

/// Substitute used when the caller supplies an empty topic.
pub const NO_TOPIC: &str = "No topic provided";

/// Strip control characters from a topic before it reaches the prompt.
///
/// Removes every character in `U+0000..=U+001F` and `U+007F..=U+009F`; all
/// other characters are kept in their original order. An empty input is
/// replaced by [`NO_TOPIC`].
///
/// # Examples
///
/// ```
/// use quill_core::sanitize_topic;
///
/// assert_eq!(sanitize_topic("rust\u{0}\u{1b}[31m async"), "rust[31m async");
/// assert_eq!(sanitize_topic(""), "No topic provided");
/// ```
pub fn sanitize_topic(topic: &str) -> String {
    if topic.is_empty() {
        return NO_TOPIC.to_string();
    }
    topic.chars().filter(|c| !is_control(*c)).collect()
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
}

/// Normalise free text into a URL-safe slug.
///
/// Lowercases, replaces non-alphanumeric runs with hyphens and strips
/// leading/trailing hyphens.
///
/// # Examples
///
/// ```
/// use quill_core::slugify;
///
/// assert_eq!(slugify("Async Rust: The Hard Parts"), "async-rust-the-hard-parts");
/// assert_eq!(slugify("already-a-slug"), "already-a-slug");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
