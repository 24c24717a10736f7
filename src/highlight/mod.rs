//! Dependency-light code highlighting for conversation messages.
//!
//! Code is escaped once, then classified by ordered regular-expression
//! passes (comments, strings, numbers, functions, keywords, types,
//! builtins). Each pass claims what it matches so that no later pass can
//! re-match inside it: a `"function"` literal inside a string is never
//! painted as a keyword.
//!
//! Output uses only `<span class="hl-<category>">` wrappers around
//! otherwise HTML-escaped text.
//!
//! ```rust
//! use claude_history::highlight::{detect_language, highlight};
//!
//! let html = highlight("let x = 1;", Some("rust"));
//! assert_eq!(
//!     html,
//!     r#"<span class="hl-keyword">let</span> x = <span class="hl-number">1</span>;"#
//! );
//! assert_eq!(detect_language("#!/bin/bash\necho hi"), Some("bash"));
//! ```
//!
//! The output is final markup. Feeding it back into [`highlight`] escapes
//! the wrappers again, so callers must apply it exactly once per snippet.

mod detect;
mod engine;
mod escape;
pub mod rules;

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

pub use detect::detect_language;
pub use engine::Annotated;
pub use escape::escape_html;
pub use rules::{resolve_language, rules_for};

use crate::config::HighlightConfig;

/// Classification assigned to a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Line or block comment.
    Comment,
    /// String or character literal.
    String,
    /// Numeric literal.
    Number,
    /// Name of a called or defined function.
    Function,
    /// Reserved word.
    Keyword,
    /// Type name.
    Type,
    /// Built-in function, object or constant.
    Builtin,
}

impl Category {
    /// All categories, in pass order.
    pub const ALL: [Category; 7] = [
        Category::Comment,
        Category::String,
        Category::Number,
        Category::Function,
        Category::Keyword,
        Category::Type,
        Category::Builtin,
    ];

    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Function => "function",
            Self::Keyword => "keyword",
            Self::Type => "type",
            Self::Builtin => "builtin",
        }
    }

    /// CSS class used in rendered markup.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Comment => "hl-comment",
            Self::String => "hl-string",
            Self::Number => "hl-number",
            Self::Function => "hl-function",
            Self::Keyword => "hl-keyword",
            Self::Type => "hl-type",
            Self::Builtin => "hl-builtin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highlight `code`, detecting the language when no tag is given.
///
/// An empty or whitespace-only tag counts as no tag. Unknown tags, and
/// undetectable code, come back as escaped text with no spans.
pub fn highlight(code: &str, language: Option<&str>) -> String {
    let language = match language.map(str::trim).filter(|l| !l.is_empty()) {
        Some(tag) => Some(tag),
        None => detect_language(code),
    };
    highlight_as(code, language)
}

/// Highlight `code` as exactly `language`, without detection.
pub fn highlight_as(code: &str, language: Option<&str>) -> String {
    annotate(code, language).html
}

/// Like [`highlight_as`], also reporting how many spans were produced.
pub fn annotate(code: &str, language: Option<&str>) -> Annotated {
    let escaped = escape_html(code);
    match language.and_then(rules_for) {
        Some(rules) => {
            let annotated = engine::annotate(&escaped, rules);
            debug!(
                language = rules.name(),
                bytes = code.len(),
                spans = annotated.spans,
                "highlighted snippet"
            );
            annotated
        }
        None => {
            debug!(language = ?language, "no rules; emitting escaped text");
            Annotated {
                html: escaped.into_owned(),
                spans: 0,
            }
        }
    }
}

/// Highlighter carrying user preferences on top of the built-in tables.
///
/// Preferences only affect which language a snippet is highlighted as;
/// the rule tables themselves are never modified.
#[derive(Debug, Clone)]
pub struct Highlighter {
    auto_detect: bool,
    fallback_language: Option<String>,
    aliases: HashMap<String, String>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Create a highlighter with detection enabled and no extra aliases.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auto_detect: true,
            fallback_language: None,
            aliases: HashMap::new(),
        }
    }

    /// Build a highlighter from the `[highlight]` configuration section.
    #[must_use]
    pub fn from_config(config: &HighlightConfig) -> Self {
        let mut highlighter = Self::new()
            .auto_detect(config.auto_detect)
            .fallback_language(config.fallback_language.clone());
        for (alias, target) in &config.aliases {
            highlighter = highlighter.with_alias(alias, target);
        }
        highlighter
    }

    /// Enable/disable language detection for untagged code.
    #[must_use]
    pub fn auto_detect(mut self, enable: bool) -> Self {
        self.auto_detect = enable;
        self
    }

    /// Language used when no tag is given and detection finds nothing.
    #[must_use]
    pub fn fallback_language(mut self, language: Option<String>) -> Self {
        self.fallback_language = language.filter(|l| !l.trim().is_empty());
        self
    }

    /// Add a user alias, resolved before the built-in alias map.
    #[must_use]
    pub fn with_alias(mut self, alias: &str, target: &str) -> Self {
        self.aliases
            .insert(alias.trim().to_ascii_lowercase(), target.to_string());
        self
    }

    /// Canonical language a snippet will be highlighted as, if any.
    pub fn effective_language(&self, code: &str, language: Option<&str>) -> Option<&'static str> {
        let declared = language.map(str::trim).filter(|l| !l.is_empty());
        if let Some(tag) = declared {
            let tag = self
                .aliases
                .get(&tag.to_ascii_lowercase())
                .map_or(tag, String::as_str);
            return resolve_language(tag);
        }

        let detected = if self.auto_detect {
            detect_language(code)
        } else {
            None
        };
        detected.or_else(|| self.fallback_language.as_deref().and_then(resolve_language))
    }

    /// Highlight a snippet according to this highlighter's preferences.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> String {
        highlight_as(code, self.effective_language(code, language))
    }
}
