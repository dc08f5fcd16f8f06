//! Fenced code block info-string parsing.

use std::ops::RangeInclusive;

/// Language and highlight annotations from a fence info string.
///
/// The first token names the language unless it is itself an annotation.
/// `{1,3-5}` marks lines (1-based) and `/word/` marks every occurrence of
/// `word`. Anything else is ignored.
///
/// # Examples
///
/// ```
/// use quill_render::FenceMeta;
///
/// let meta = FenceMeta::parse("rust {1,3-4} /println!/ title=\"main.rs\"");
/// assert_eq!(meta.language.as_deref(), Some("rust"));
/// assert!(meta.is_line_highlighted(3));
/// assert!(!meta.is_line_highlighted(2));
/// assert_eq!(meta.words, vec!["println!".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceMeta {
    /// Language tag, if present
    pub language: Option<String>,
    /// Highlighted line ranges, 1-based and inclusive
    pub highlighted_lines: Vec<RangeInclusive<usize>>,
    /// Highlighted words
    pub words: Vec<String>,
}

impl FenceMeta {
    /// Parse an info string. Never fails; malformed annotations are skipped.
    pub fn parse(info: &str) -> Self {
        let info = info.trim();
        let (language, rest) = match info.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest),
            None => (info, ""),
        };

        let mut meta = Self::default();
        let annotations = if language.starts_with('{') || language.starts_with('/') {
            info
        } else {
            if !language.is_empty() {
                meta.language = Some(language.to_string());
            }
            rest
        };
        meta.parse_annotations(annotations);
        meta
    }

    /// True when line `line` (1-based) is highlighted.
    pub fn is_line_highlighted(&self, line: usize) -> bool {
        self.highlighted_lines.iter().any(|range| range.contains(&line))
    }

    fn parse_annotations(&mut self, annotations: &str) {
        let mut rest = annotations;
        while let Some(start) = rest.find(['{', '/']) {
            let open = rest.as_bytes()[start];
            let body = &rest[start + 1..];
            let close = if open == b'{' { '}' } else { '/' };
            let Some(end) = body.find(close) else {
                break;
            };
            let inner = &body[..end];
            if open == b'{' {
                self.parse_ranges(inner);
            } else if !inner.is_empty() {
                self.words.push(inner.to_string());
            }
            rest = &body[end + 1..];
        }
    }

    fn parse_ranges(&mut self, ranges: &str) {
        for part in ranges.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let parsed = match part.split_once('-') {
                Some((from, to)) => from
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .zip(to.trim().parse::<usize>().ok()),
                None => part.parse::<usize>().ok().map(|n| (n, n)),
            };
            match parsed {
                Some((from, to)) if from >= 1 && from <= to => {
                    self.highlighted_lines.push(from..=to);
                }
                _ => tracing::debug!(range = part, "Ignoring malformed line range"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_info() {
        assert_eq!(FenceMeta::parse(""), FenceMeta::default());
    }

    #[test]
    fn test_annotations_without_language() {
        let meta = FenceMeta::parse("{2} /foo/");
        assert!(meta.language.is_none());
        assert!(meta.is_line_highlighted(2));
        assert_eq!(meta.words, vec!["foo".to_string()]);
    }

    #[test]
    fn test_malformed_ranges_skipped() {
        let meta = FenceMeta::parse("js {0,5-3,x,2-3} /unterminated");
        assert_eq!(meta.language.as_deref(), Some("js"));
        assert_eq!(meta.highlighted_lines, vec![2..=3]);
        assert!(meta.words.is_empty());
    }

    #[test]
    fn test_unbounded_range_is_not_expanded() {
        let meta = FenceMeta::parse(&format!("rust {{2-{}}}", usize::MAX));
        assert_eq!(meta.highlighted_lines, vec![2..=usize::MAX]);
        assert!(!meta.is_line_highlighted(1));
        assert!(meta.is_line_highlighted(2));
        assert!(meta.is_line_highlighted(usize::MAX));
    }

    #[test]
    fn test_multiple_words() {
        let meta = FenceMeta::parse("ts /useState/ /useEffect/");
        assert_eq!(meta.words, vec!["useState", "useEffect"]);
    }
}
