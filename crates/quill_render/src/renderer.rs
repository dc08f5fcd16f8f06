//! Markdown to HTML conversion.

use crate::escape::is_unsafe_url;
use crate::{FenceMeta, Highlighter, RenderOptions};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html::push_html};
use tracing::{debug, instrument};

/// Replacement destination for links that would run script.
const NEUTRAL_URL: &str = "#";

/// Renders post bodies to HTML.
///
/// Construction loads syntect's syntax and theme sets, so build one renderer
/// at start-up and share it; rendering takes `&self` and is safe to call
/// concurrently.
#[derive(Debug)]
pub struct MarkdownRenderer {
    options: RenderOptions,
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    /// Build a renderer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        let highlighter = Highlighter::new(options.theme());
        Self {
            options,
            highlighter,
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render Markdown to HTML.
    ///
    /// Uses pulldown-cmark with GFM extensions (tables, strikethrough, task
    /// lists, footnotes). Raw HTML is escaped and shown as text. Never fails:
    /// malformed Markdown renders as best it can.
    #[instrument(skip_all, fields(len = markdown.len()))]
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES;

        let parser = Parser::new_ext(markdown, options);
        let events = self.transform(parser);

        let mut html = String::with_capacity(markdown.len() * 2);
        push_html(&mut html, events.into_iter());
        debug!(html_len = html.len(), "Rendered markdown");
        html
    }

    /// Walk the event stream, sanitizing and replacing code with highlighted
    /// HTML.
    fn transform<'a>(&self, parser: Parser<'a>) -> Vec<Event<'a>> {
        let mut events: Vec<Event<'a>> = Vec::new();
        let mut code_block: Option<(FenceMeta, String)> = None;

        for event in parser {
            if let Some((_, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((meta, code)) = code_block.take() {
                            events.push(Event::Html(self.render_block(&meta, &code).into()));
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let meta = match kind {
                        CodeBlockKind::Fenced(info) => FenceMeta::parse(&info),
                        CodeBlockKind::Indented => FenceMeta::default(),
                    };
                    code_block = Some((meta, String::new()));
                }
                Event::Code(code) => {
                    events.push(Event::Html(self.render_inline(&code).into()));
                }
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    events.push(Event::Text(raw));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: neutralize(dest_url),
                        title,
                        id,
                    }));
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    events.push(Event::Start(Tag::Image {
                        link_type,
                        dest_url: neutralize(dest_url),
                        title,
                        id,
                    }));
                }
                other => events.push(other),
            }
        }

        // An unterminated block still renders what was collected.
        if let Some((meta, code)) = code_block {
            events.push(Event::Html(self.render_block(&meta, &code).into()));
        }
        events
    }

    fn render_block(&self, meta: &FenceMeta, code: &str) -> String {
        let language = meta
            .language
            .as_deref()
            .unwrap_or(self.options.default_block_language().as_str());
        self.highlighter.block(code, language, meta)
    }

    fn render_inline(&self, code: &str) -> String {
        let (code, language) = split_inline_language(code)
            .unwrap_or((code, self.options.default_inline_language().as_str()));
        self.highlighter.inline(code, language)
    }
}

fn neutralize(url: CowStr<'_>) -> CowStr<'_> {
    if is_unsafe_url(&url) {
        debug!("Neutralised unsafe link destination");
        CowStr::Borrowed(NEUTRAL_URL)
    } else {
        url
    }
}

/// Split a trailing `{:lang}` language suffix off inline code.
fn split_inline_language(code: &str) -> Option<(&str, &str)> {
    let body = code.strip_suffix('}')?;
    let start = body.rfind("{:")?;
    let language = &body[start + 2..];
    let valid = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.'));
    valid.then(|| (&code[..start], language))
}
