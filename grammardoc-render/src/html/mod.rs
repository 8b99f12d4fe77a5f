//! HTML output: options, themes and the complete-document wrapper
//!
//! Fragments produced by the renderer are self-contained; this module adds
//! the optional outer shell: a full HTML5 document with the baseline CSS
//! embedded, an optional theme overlay and any user CSS appended last, so
//! the output is a single self-contained file.

pub mod dom;
pub mod renderer;

/// Baseline stylesheet embedded into every complete document. Also exposed
/// for the CLI's `generate-css` command so users can start customizing from
/// the real defaults.
pub const BASELINE_CSS: &str = include_str!("../../css/baseline.css");

/// Available CSS themes for complete-document output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlTheme {
    /// Baseline only (the overlay is a no-op)
    Modern,
    /// Dark overrides layered on the baseline
    Slate,
}

impl Default for HtmlTheme {
    fn default() -> Self {
        HtmlTheme::Modern
    }
}

impl HtmlTheme {
    /// Resolve a configured theme name; unknown names fall back to `Modern`.
    pub fn from_name(name: &str) -> HtmlTheme {
        match name {
            "slate" => HtmlTheme::Slate,
            _ => HtmlTheme::Modern,
        }
    }

    fn stylesheet(self) -> &'static str {
        match self {
            HtmlTheme::Modern => include_str!("../../css/themes/theme-modern.css"),
            HtmlTheme::Slate => include_str!("../../css/themes/theme-slate.css"),
        }
    }
}

/// Options for complete-document output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// CSS theme to layer over the baseline
    pub theme: HtmlTheme,
    /// Document `<title>`
    pub title: String,
    /// Optional custom CSS appended after the baseline and theme CSS
    pub custom_css: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            theme: HtmlTheme::Modern,
            title: "Grammar Documentation".to_string(),
            custom_css: None,
        }
    }
}

impl HtmlOptions {
    pub fn new(theme: HtmlTheme) -> Self {
        HtmlOptions {
            theme,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Wrap rendered fragments in a complete HTML document with embedded CSS.
pub fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let baseline_css = BASELINE_CSS;
    let theme_css = options.theme.stylesheet();
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(&options.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="grammardoc">
  <title>{escaped_title}</title>
  <style>
{baseline_css}
{theme_css}
{custom_css}
  </style>
</head>
<body>
<div class="gd-document">
{body_html}
</div>
</body>
</html>"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
