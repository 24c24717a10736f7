//! Highlight command implementation.
//!
//! Highlights one or more files (or stdin) and prints HTML. Several files
//! are processed in parallel on the rayon pool.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Cli, HighlightArgs, OutputFormat};
use crate::error::{Result, ViewerError};
use crate::highlight::{highlight_as, Highlighter};
use crate::util::{input_name, read_input};

use super::get_highlighter;

/// Result of highlighting a single input.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightedFile {
    /// Input name (`<stdin>` for standard input).
    pub file: String,
    /// Canonical language used, if any.
    pub language: Option<&'static str>,
    /// Highlighted HTML.
    pub html: String,
}

/// Run the highlight command.
pub fn run(cli: &Cli, args: &HighlightArgs) -> Result<()> {
    if args.lang.as_deref().is_some_and(|l| l.trim().is_empty()) {
        return Err(ViewerError::InvalidArgument {
            name: "--lang".to_string(),
            reason: "language tag must not be empty".to_string(),
        });
    }

    let highlighter = get_highlighter(cli)?.auto_detect(!args.no_detect);

    let results: Vec<HighlightedFile> = if args.files.is_empty() {
        vec![highlight_input(&highlighter, None, args.lang.as_deref())?]
    } else {
        args.files
            .par_iter()
            .map(|path| highlight_input(&highlighter, Some(path), args.lang.as_deref()))
            .collect::<Result<_>>()?
    };

    info!(inputs = results.len(), "highlighted inputs");

    match cli.effective_output() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            let labelled = results.len() > 1 && !cli.quiet;
            for result in &results {
                if labelled {
                    println!("<!-- {} -->", result.file);
                }
                if args.wrap {
                    println!("{}", wrap_pre(result));
                } else {
                    println!("{}", result.html);
                }
            }
        }
    }

    Ok(())
}

/// Highlight one input, using `--lang`, then the file extension, then detection.
pub fn highlight_input(
    highlighter: &Highlighter,
    path: Option<&PathBuf>,
    lang: Option<&str>,
) -> Result<HighlightedFile> {
    let path = path.map(PathBuf::as_path);
    let code = read_input(path)?;
    let language = choose_language(highlighter, &code, path, lang);
    debug!(file = %input_name(path), language = ?language, "highlighting input");

    Ok(HighlightedFile {
        file: input_name(path),
        language,
        html: highlight_as(&code, language),
    })
}

fn choose_language(
    highlighter: &Highlighter,
    code: &str,
    path: Option<&Path>,
    lang: Option<&str>,
) -> Option<&'static str> {
    if lang.is_some() {
        return highlighter.effective_language(code, lang);
    }

    let extension = path
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str());
    extension
        .and_then(|ext| highlighter.effective_language(code, Some(ext)))
        .or_else(|| highlighter.effective_language(code, None))
}

fn wrap_pre(result: &HighlightedFile) -> String {
    match result.language {
        Some(language) => format!(
            "<pre><code class=\"language-{language}\">{}</code></pre>",
            result.html
        ),
        None => format!("<pre><code>{}</code></pre>", result.html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_selects_language() {
        let highlighter = Highlighter::new();
        let path = Path::new("script.py");
        assert_eq!(
            choose_language(&highlighter, "x = 1", Some(path), None),
            Some("python")
        );
    }

    #[test]
    fn test_explicit_lang_wins_over_extension() {
        let highlighter = Highlighter::new();
        let path = Path::new("script.py");
        assert_eq!(
            choose_language(&highlighter, "x = 1", Some(path), Some("rs")),
            Some("rust")
        );
    }

    #[test]
    fn test_unknown_extension_falls_back_to_detection() {
        let highlighter = Highlighter::new();
        let path = Path::new("notes.txt");
        assert_eq!(
            choose_language(&highlighter, "#!/bin/bash\necho hi", Some(path), None),
            Some("bash")
        );
        assert_eq!(
            choose_language(&highlighter.clone().auto_detect(false), "#!/bin/bash", Some(path), None),
            None
        );
    }

    #[test]
    fn test_highlight_input_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("main.go");
        std::fs::write(&path, "func main() {}").unwrap();

        let result = highlight_input(&Highlighter::new(), Some(&path), None).unwrap();
        assert_eq!(result.language, Some("go"));
        assert!(result.html.starts_with("<span class=\"hl-keyword\">func</span>"));
    }

    #[test]
    fn test_wrap_pre() {
        let result = HighlightedFile {
            file: "a".to_string(),
            language: None,
            html: "x &lt; y".to_string(),
        };
        assert_eq!(wrap_pre(&result), "<pre><code>x &lt; y</code></pre>");
    }
}
