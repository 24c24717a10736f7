//! Rendering of message bodies that may contain fenced code blocks.
//!
//! This is the caller side of the highlighter: fenced blocks are cut out of
//! the message first and each is highlighted exactly once, while the
//! surrounding prose is only escaped (with optional inline `code` markup).
//! Highlighted output is never passed back through the highlighter.

use crate::config::Config;
use crate::highlight::{escape_html, highlight_as, Highlighter};

/// A piece of a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Prose between code fences.
    Text(String),
    /// A fenced code block.
    Code {
        /// First word of the fence info string, if any.
        info: Option<String>,
        /// Code between the fences.
        code: String,
    },
}

/// Split a message body into prose and fenced code blocks.
///
/// A line starting with ```` ``` ```` opens or closes a fence. An unclosed
/// fence runs to the end of the text.
pub fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut code: Vec<&str> = Vec::new();
    let mut info: Option<String> = None;
    let mut in_code_block = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            if in_code_block {
                blocks.push(Block::Code {
                    info: info.take(),
                    code: code.join("\n"),
                });
                code.clear();
                in_code_block = false;
            } else {
                if !prose.is_empty() {
                    blocks.push(Block::Text(prose.join("\n")));
                    prose.clear();
                }
                info = fence_info(line);
                in_code_block = true;
            }
        } else if in_code_block {
            code.push(line);
        } else {
            prose.push(line);
        }
    }

    if in_code_block && !code.is_empty() {
        blocks.push(Block::Code {
            info,
            code: code.join("\n"),
        });
    }
    if !prose.is_empty() {
        blocks.push(Block::Text(prose.join("\n")));
    }

    blocks
}

fn fence_info(line: &str) -> Option<String> {
    let info = line.trim_start().trim_start_matches('`').trim();
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|word| !word.is_empty())
        .map(str::to_string)
}

/// Renders message bodies to HTML fragments or standalone documents.
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    highlighter: Highlighter,
    inline_code: bool,
    dark_theme: bool,
    title: Option<String>,
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(Highlighter::new())
    }
}

impl MessageRenderer {
    /// Create a renderer using `highlighter` for code blocks.
    #[must_use]
    pub fn new(highlighter: Highlighter) -> Self {
        Self {
            highlighter,
            inline_code: true,
            dark_theme: false,
            title: None,
        }
    }

    /// Create a renderer from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut renderer = Self::new(Highlighter::from_config(&config.highlight))
            .inline_code(config.render.inline_code)
            .dark_theme(config.render.dark_theme);
        renderer.title = config.render.title.clone();
        renderer
    }

    /// Enable/disable inline `code` markup in prose.
    #[must_use]
    pub fn inline_code(mut self, enable: bool) -> Self {
        self.inline_code = enable;
        self
    }

    /// Use the dark stylesheet for standalone documents.
    #[must_use]
    pub fn dark_theme(mut self, dark: bool) -> Self {
        self.dark_theme = dark;
        self
    }

    /// Set the standalone document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render a message body to an HTML fragment.
    pub fn render(&self, text: &str) -> String {
        let mut html = String::with_capacity(text.len() * 2);
        for block in split_blocks(text) {
            match block {
                Block::Text(prose) => {
                    if prose.trim().is_empty() {
                        continue;
                    }
                    html.push_str("<div class=\"text\">");
                    let lines: Vec<String> = prose.lines().map(|l| self.render_prose_line(l)).collect();
                    html.push_str(&lines.join("\n"));
                    html.push_str("</div>\n");
                }
                Block::Code { info, code } => {
                    let language = self.highlighter.effective_language(&code, info.as_deref());
                    let body = highlight_as(&code, language);
                    match language.map(str::to_string).or_else(|| info.as_deref().map(class_safe)) {
                        Some(label) if !label.is_empty() => {
                            html.push_str(&format!(
                                "<pre class=\"code-block\"><code class=\"language-{label}\">{body}</code></pre>\n"
                            ));
                        }
                        _ => {
                            html.push_str(&format!(
                                "<pre class=\"code-block\"><code>{body}</code></pre>\n"
                            ));
                        }
                    }
                }
            }
        }
        html
    }

    /// Render a message body as a complete HTML document.
    pub fn render_document(&self, text: &str) -> String {
        standalone_document(
            &self.render(text),
            self.title.as_deref().unwrap_or("Conversation"),
            self.dark_theme,
        )
    }

    fn render_prose_line(&self, line: &str) -> String {
        if self.inline_code {
            inline_code(line)
        } else {
            escape_html(line).into_owned()
        }
    }
}

/// Escape a prose line, marking backtick-wrapped spans as inline code.
fn inline_code(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut buffer = String::new();
    let mut in_inline_code = false;

    for c in line.chars() {
        if c == '`' {
            if in_inline_code {
                out.push_str("<code>");
                out.push_str(&escape_html(&buffer));
                out.push_str("</code>");
            } else {
                out.push_str(&escape_html(&buffer));
            }
            buffer.clear();
            in_inline_code = !in_inline_code;
        } else {
            buffer.push(c);
        }
    }

    if in_inline_code {
        // Unclosed: keep the backtick as literal text.
        out.push('`');
    }
    out.push_str(&escape_html(&buffer));
    out
}

/// Keep only characters safe inside a class attribute.
fn class_safe(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
        .collect()
}

/// Stylesheet for `hl-*` spans and rendered blocks.
pub fn stylesheet(dark: bool) -> &'static str {
    if dark {
        DARK_STYLES
    } else {
        LIGHT_STYLES
    }
}

/// Wrap an HTML body fragment in a minimal standalone document.
pub fn standalone_document(body: &str, title: &str, dark: bool) -> String {
    let mut html = String::with_capacity(body.len() + 2048);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!(
        "  <meta name=\"generator\" content=\"claude-history {}\">\n",
        crate::VERSION
    ));
    html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    html.push_str("  <style>\n");
    html.push_str(BASE_STYLES);
    html.push_str(stylesheet(dark));
    html.push_str("  </style>\n");
    html.push_str("</head>\n");
    html.push_str(&format!(
        "<body class=\"{}\">\n<main class=\"conversation\">\n",
        if dark { "dark" } else { "light" }
    ));
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

const BASE_STYLES: &str = r"
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      line-height: 1.6;
      margin: 0;
      padding: 20px;
    }
    .conversation { max-width: 900px; margin: 0 auto; }
    .text { white-space: pre-wrap; margin: 0.5em 0; }
    pre, code { font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace; font-size: 0.9em; }
    pre.code-block { padding: 12px; border-radius: 6px; overflow-x: auto; }
";

const LIGHT_STYLES: &str = r"
    body { background-color: #ffffff; color: #1a1a1a; }
    pre.code-block, code { background-color: #f4f4f4; }
    .hl-comment { color: #6a737d; font-style: italic; }
    .hl-string { color: #032f62; }
    .hl-number { color: #005cc5; }
    .hl-function { color: #6f42c1; }
    .hl-keyword { color: #d73a49; font-weight: 600; }
    .hl-type { color: #e36209; }
    .hl-builtin { color: #005cc5; }
";

const DARK_STYLES: &str = r"
    body { background-color: #1a1a1a; color: #e0e0e0; }
    pre.code-block, code { background-color: #2d2d2d; }
    .hl-comment { color: #8b949e; font-style: italic; }
    .hl-string { color: #a5d6ff; }
    .hl-number { color: #79c0ff; }
    .hl-function { color: #d2a8ff; }
    .hl-keyword { color: #ff7b72; font-weight: 600; }
    .hl-type { color: #ffa657; }
    .hl-builtin { color: #79c0ff; }
";
