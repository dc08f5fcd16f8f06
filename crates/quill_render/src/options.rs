//! Renderer options.

use quill_core::RenderConfig;

/// Theme and language defaults for the renderer.
///
/// # Examples
///
/// ```
/// use quill_render::RenderOptions;
///
/// let options = RenderOptions::builder()
///     .default_block_language("rust")
///     .build()
///     .unwrap();
/// assert_eq!(options.theme(), "base16-ocean.dark");
/// assert_eq!(options.default_block_language(), "rust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct RenderOptions {
    /// syntect theme name
    theme: String,
    /// Language used for fences without a tag
    default_block_language: String,
    /// Language used for inline code without a `{:lang}` suffix
    default_inline_language: String,
}

impl RenderOptions {
    /// Creates a new options builder.
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            theme: config.theme.clone(),
            default_block_language: config.default_block_language.clone(),
            default_inline_language: config.default_inline_language.clone(),
        }
    }
}
