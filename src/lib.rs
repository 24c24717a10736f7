//! claude-history: local viewer tooling for Claude Code conversation history.
//!
//! The core of the crate is a dependency-light code highlighter that turns
//! code snippets of unknown or declared language into HTML-safe markup,
//! plus the renderer that applies it to message bodies with fenced code.
//!
//! # Quick Start
//!
//! ```rust
//! use claude_history::highlight::highlight;
//!
//! let html = highlight(r#"const x = "function() {}";"#, Some("js"));
//! assert!(html.starts_with(r#"<span class="hl-keyword">const</span>"#));
//! assert!(html.contains(r#"<span class="hl-string">"function() {}"</span>"#));
//! ```
//!
//! # Architecture
//!
//! - [`highlight`]: escaping, rule tables, language detection and the pass engine
//! - [`render`]: fenced-code extraction and HTML rendering of message bodies
//! - [`cli`]: command-line interface
//! - [`config`]: configuration management
//! - [`error`]: error types and handling
//! - [`util`]: atomic writes and input helpers

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod render;
pub mod util;

// Re-export commonly used types at the crate root
pub use error::{Result, ViewerError};
pub use highlight::{detect_language, highlight, Highlighter};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ViewerError};
    pub use crate::highlight::{
        detect_language, highlight, highlight_as, resolve_language, Category, Highlighter,
    };
    pub use crate::render::MessageRenderer;
}
