//! Syntax highlighting with syntect.

use crate::FenceMeta;
use crate::escape::escape_html;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Loaded syntax definitions and one theme.
///
/// Loading is expensive; build one per renderer and reuse it.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
    theme_name: String,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("theme_name", &self.theme_name)
            .finish_non_exhaustive()
    }
}

impl Highlighter {
    /// Load the bundled syntaxes and the named theme.
    ///
    /// An unknown theme falls back to `base16-ocean.dark` with a warning.
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let (theme_name, theme) = match themes.remove(theme_name) {
            Some(theme) => (theme_name.to_string(), theme),
            None => {
                warn!(
                    theme = theme_name,
                    fallback = FALLBACK_THEME,
                    "Unknown highlighting theme"
                );
                let theme = themes.remove(FALLBACK_THEME).unwrap_or_default();
                (FALLBACK_THEME.to_string(), theme)
            }
        };

        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
            theme_name,
        }
    }

    /// Name of the active theme.
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_token(language)
            .unwrap_or_else(|| {
                debug!(language, "No syntax for language, using plain text");
                self.syntaxes.find_syntax_plain_text()
            })
    }

    fn background_style(&self) -> String {
        self.theme
            .settings
            .background
            .map(|c| format!("background-color:{};", css_color(c)))
            .unwrap_or_default()
    }

    /// Render a fenced block as `<pre><code>` with one span per line.
    pub fn block(&self, code: &str, language: &str, meta: &FenceMeta) -> String {
        let language_attr = escape_html(language);
        let mut html = format!(
            r#"<pre data-language="{lang}" data-theme="{theme}" style="{bg}"><code data-language="{lang}" data-theme="{theme}" style="display: grid;">"#,
            lang = language_attr,
            theme = escape_html(&self.theme_name),
            bg = self.background_style(),
        );

        let code = code.strip_suffix('\n').unwrap_or(code);
        if !code.is_empty() {
            let lines = self.highlight_lines(code, language);
            for (index, spans) in lines.iter().enumerate() {
                if index > 0 {
                    html.push('\n');
                }
                let number = index + 1;
                if meta.is_line_highlighted(number) {
                    html.push_str(
                        r#"<span data-line="" class="line highlighted" data-highlighted-line="">"#,
                    );
                } else {
                    html.push_str(r#"<span data-line="" class="line">"#);
                }
                if spans.iter().all(|(_, text)| text.is_empty()) {
                    html.push_str("<span> </span>");
                } else {
                    render_line(&mut html, spans, &meta.words);
                }
                html.push_str("</span>");
            }
        }

        html.push_str("</code></pre>\n");
        html
    }

    /// Render inline code as a highlighted `<code>` element.
    pub fn inline(&self, code: &str, language: &str) -> String {
        let mut html = format!(
            r#"<code data-language="{}" data-theme="{}" style="{}">"#,
            escape_html(language),
            escape_html(&self.theme_name),
            self.background_style(),
        );
        for spans in self.highlight_lines(code, language) {
            render_line(&mut html, &spans, &[]);
        }
        html.push_str("</code>");
        html
    }

    /// Highlight each line, dropping line terminators.
    ///
    /// On a highlighting failure the remaining lines are returned unstyled.
    fn highlight_lines<'c>(
        &self,
        code: &'c str,
        language: &str,
    ) -> Vec<Vec<(Option<Style>, &'c str)>> {
        let syntax = self.syntax_for(language);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut failed = false;
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if failed {
                lines.push(vec![(None, trimmed)]);
                continue;
            }
            match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(regions) => {
                    let mut kept = Vec::with_capacity(regions.len());
                    let mut remaining = trimmed.len();
                    for (style, text) in regions {
                        if remaining == 0 {
                            break;
                        }
                        let take = text.len().min(remaining);
                        if take > 0 {
                            kept.push((Some(style), &text[..take]));
                            remaining -= take;
                        }
                    }
                    lines.push(kept);
                }
                Err(e) => {
                    warn!(error = %e, language, "Highlighting failed, rendering plain text");
                    failed = true;
                    lines.push(vec![(None, trimmed)]);
                }
            }
        }
        lines
    }
}

fn css_color(c: Color) -> String {
    if c.a == 0xff {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

fn span_style(style: &Style) -> String {
    let mut css = format!("color:{};", css_color(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        css.push_str("font-weight:bold;");
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        css.push_str("font-style:italic;");
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        css.push_str("text-decoration:underline;");
    }
    css
}

/// Byte ranges of non-overlapping word occurrences, in order.
fn word_ranges(line: &str, words: &[String]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = words
        .iter()
        .filter(|w| !w.is_empty())
        .flat_map(|w| line.match_indices(w.as_str()).map(|(i, m)| (i, i + m.len())))
        .collect();
    ranges.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last() {
            Some(&(_, last_end)) if start < last_end => {}
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Append styled spans for one line, wrapping highlighted words in `<mark>`.
fn render_line(html: &mut String, spans: &[(Option<Style>, &str)], words: &[String]) {
    let line: String = spans.iter().map(|(_, t)| *t).collect();
    let marks = word_ranges(&line, words);

    let mut boundaries: Vec<usize> = marks.iter().flat_map(|&(s, e)| [s, e]).collect();
    boundaries.dedup();

    let mut offset = 0;
    for (style, text) in spans {
        let span_end = offset + text.len();
        let mut cut = offset;
        let splits = boundaries
            .iter()
            .copied()
            .filter(|b| *b > offset && *b < span_end)
            .chain(std::iter::once(span_end));

        for piece_end in splits {
            if marks.iter().any(|&(s, _)| s == cut) {
                html.push_str(r#"<mark class="word" data-highlighted-chars="">"#);
            }
            let piece = &text[cut - offset..piece_end - offset];
            if !piece.is_empty() {
                match style {
                    Some(style) => {
                        html.push_str(&format!(
                            r#"<span style="{}">{}</span>"#,
                            span_style(style),
                            escape_html(piece)
                        ));
                    }
                    None => html.push_str(&format!("<span>{}</span>", escape_html(piece))),
                }
            }
            if marks.iter().any(|&(_, e)| e == piece_end) {
                html.push_str("</mark>");
            }
            cut = piece_end;
        }
        offset = span_end;
    }
}
