//! Heuristic language detection for untagged code.
//!
//! Heuristics are deliberately crude substring and prefix checks, tried in
//! order; the first one that recognizes the snippet wins. False positives
//! are accepted.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

type Heuristic = fn(&str) -> Option<&'static str>;

/// Heuristics in priority order, named for tracing.
const HEURISTICS: &[(&str, Heuristic)] = &[
    ("shebang", shebang),
    ("json", json_document),
    ("markup", markup),
    ("rust", rust_source),
    ("go", go_source),
    ("python", python_source),
    ("typescript", typescript_source),
    ("javascript", javascript_source),
    ("sql", sql_statement),
    ("css", css_rules),
    ("bash", shell_session),
];

/// Guess the language of `code`.
///
/// Returns a canonical language key, or `None` when no heuristic matches.
pub fn detect_language(code: &str) -> Option<&'static str> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return None;
    }

    HEURISTICS.iter().find_map(|(name, heuristic)| {
        let found = heuristic(trimmed);
        if let Some(language) = found {
            trace!(heuristic = name, language, "language detected");
        }
        found
    })
}

fn shebang(code: &str) -> Option<&'static str> {
    let first_line = code.lines().next()?;
    if !first_line.starts_with("#!") {
        return None;
    }
    if first_line.contains("python") {
        Some("python")
    } else if ["node", "deno", "bun"].iter().any(|n| first_line.contains(n)) {
        Some("javascript")
    } else if first_line.contains("ruby") {
        Some("ruby")
    } else if first_line.contains("sh") {
        Some("bash")
    } else {
        None
    }
}

fn json_document(code: &str) -> Option<&'static str> {
    let inner = if code.starts_with('{') && code.ends_with('}') {
        code[1..code.len() - 1].trim_start()
    } else if code.starts_with('[') && code.ends_with(']') {
        code[1..code.len() - 1].trim_start()
    } else {
        return None;
    };

    let first = inner.chars().next();
    let plausible = match first {
        None => true,
        Some(c) => {
            c == '"'
                || c == '{'
                || c == '['
                || c == '-'
                || c.is_ascii_digit()
                || inner.starts_with("true")
                || inner.starts_with("false")
                || inner.starts_with("null")
        }
    };
    plausible.then_some("json")
}

fn markup(code: &str) -> Option<&'static str> {
    let head: String = code.chars().take(256).collect::<String>().to_ascii_lowercase();
    if head.starts_with("<!doctype") || head.contains("<html") {
        return Some("html");
    }
    (code.starts_with('<') && code.ends_with('>') && code.contains("</")).then_some("html")
}

fn rust_source(code: &str) -> Option<&'static str> {
    const MARKERS: &[&str] = &["fn main(", "pub fn ", "impl ", "use std::", "#[derive(", "let mut "];
    let hit = MARKERS.iter().any(|m| code.contains(m)) || (code.contains("fn ") && code.contains("->"));
    hit.then_some("rust")
}

fn go_source(code: &str) -> Option<&'static str> {
    let hit = (code.starts_with("package ") && (code.contains("func ") || code.contains("import ")))
        || (code.contains("func ") && code.contains(":="));
    hit.then_some("go")
}

fn python_source(code: &str) -> Option<&'static str> {
    let hit = code.lines().map(str::trim_start).any(|line| {
        (line.starts_with("def ") && line.trim_end().ends_with(':'))
            || (line.starts_with("class ") && line.trim_end().ends_with(':'))
            || (line.starts_with("from ") && line.contains(" import "))
            || (line.starts_with("import ")
                && !line.contains(" from ")
                && !line.contains(['\'', '"', ';', '{']))
            || line.starts_with("elif ")
            || line.contains("__name__")
    });
    hit.then_some("python")
}

static TS_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:interface|type)\s+\w+\s*(?:=|\{|<)|:\s*(?:string|number|boolean)\b")
        .unwrap()
});

fn typescript_source(code: &str) -> Option<&'static str> {
    TS_ANNOTATION.is_match(code).then_some("typescript")
}

fn javascript_source(code: &str) -> Option<&'static str> {
    const MARKERS: &[&str] = &[
        "const ", "let ", "function ", "=>", "console.", "require(", "export default",
        "document.",
    ];
    MARKERS.iter().any(|m| code.contains(m)).then_some("javascript")
}

static SQL_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)^(?:select|insert|update|delete|create|alter|drop|with)\b.*\b(?:from|into|table|set|where|as|index|view)\b",
    )
    .unwrap()
});

fn sql_statement(code: &str) -> Option<&'static str> {
    SQL_STATEMENT.is_match(code).then_some("sql")
}

static CSS_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^{}()=;]+\{[^{}]*?[a-z-]+\s*:\s*[^;{}]+;").unwrap()
});

fn css_rules(code: &str) -> Option<&'static str> {
    CSS_RULE.is_match(code).then_some("css")
}

fn shell_session(code: &str) -> Option<&'static str> {
    const COMMANDS: &[&str] = &[
        "apt", "brew", "cargo", "cd", "chmod", "cp", "curl", "docker", "echo", "export", "git",
        "ls", "make", "mkdir", "mv", "npm", "npx", "pip", "pnpm", "rm", "sudo", "yarn",
    ];
    let first_line = code.lines().next()?;
    if first_line.starts_with("$ ") {
        return Some("bash");
    }
    let first_word = first_line.split_whitespace().next()?;
    COMMANDS.contains(&first_word).then_some("bash")
}
