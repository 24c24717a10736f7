//! Ordered pass engine with placeholder protection.
//!
//! The working text is a list of [`Segment`]s. A pass only ever scans
//! [`Segment::Text`] runs; every match it finds is rendered once into the
//! ledger and replaced by a [`Segment::Claimed`] index, which no later pass
//! can see into. Restoration is a single walk that splices ledger entries
//! back in verbatim.

use tracing::trace;

use super::rules::{CompiledRules, Pass};
use super::Category;

/// One run of the working text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Escaped text not yet classified.
    Text(String),
    /// Index into the ledger.
    Claimed(usize),
}

/// Result of running every pass over one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    /// Final markup.
    pub html: String,
    /// Number of classified spans (ledger entries) restored into `html`.
    pub spans: usize,
}

/// Run the rule passes over already-escaped text.
pub(crate) fn annotate(escaped: &str, rules: &CompiledRules) -> Annotated {
    let mut segments = vec![Segment::Text(escaped.to_string())];
    let mut ledger: Vec<String> = Vec::new();

    for pass in rules.passes() {
        let before = ledger.len();
        segments = apply_pass(segments, pass, rules, &mut ledger);
        trace!(
            language = rules.name(),
            category = pass.category.as_str(),
            matches = ledger.len() - before,
            "highlight pass"
        );
    }

    Annotated {
        html: restore(&segments, &ledger, escaped.len()),
        spans: ledger.len(),
    }
}

fn apply_pass(
    segments: Vec<Segment>,
    pass: &Pass,
    rules: &CompiledRules,
    ledger: &mut Vec<String>,
) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => split_text(&text, pass, rules, ledger, &mut out),
            claimed @ Segment::Claimed(_) => out.push(claimed),
        }
    }
    out
}

fn split_text(
    text: &str,
    pass: &Pass,
    rules: &CompiledRules,
    ledger: &mut Vec<String>,
    out: &mut Vec<Segment>,
) {
    let mut last = 0;

    for caps in pass.regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        // First participating group is the classified span, if the pattern has groups.
        let target = caps.iter().skip(1).flatten().next().unwrap_or(whole);

        if target.as_str().is_empty() {
            continue;
        }
        // `if(` and friends belong to the keyword pass.
        if pass.category == Category::Function && rules.is_keyword(target.as_str()) {
            continue;
        }

        if target.start() > last {
            out.push(Segment::Text(text[last..target.start()].to_string()));
        }
        out.push(Segment::Claimed(ledger.len()));
        ledger.push(wrap(pass.category, target.as_str()));
        last = target.end();
    }

    if last == 0 {
        out.push(Segment::Text(text.to_string()));
    } else if last < text.len() {
        out.push(Segment::Text(text[last..].to_string()));
    }
}

fn wrap(category: Category, text: &str) -> String {
    format!(r#"<span class="{}">{}</span>"#, category.class_name(), text)
}

fn restore(segments: &[Segment], ledger: &[String], hint: usize) -> String {
    let extra: usize = ledger.iter().map(String::len).sum();
    let mut html = String::with_capacity(hint + extra);
    for segment in segments {
        match segment {
            Segment::Text(text) => html.push_str(text),
            Segment::Claimed(index) => {
                debug_assert!(*index < ledger.len(), "placeholder {index} outside ledger");
                if let Some(span) = ledger.get(*index) {
                    html.push_str(span);
                }
            }
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::rules::rules_for;

    fn run(code: &str, lang: &str) -> Annotated {
        annotate(code, rules_for(lang).unwrap())
    }

    #[test]
    fn test_claimed_spans_are_opaque_to_later_passes() {
        let out = run(r#"x = "if 1""#, "python");
        assert_eq!(out.html, r#"x = <span class="hl-string">"if 1"</span>"#);
        assert_eq!(out.spans, 1);
    }

    #[test]
    fn test_group_limits_classified_span() {
        let out = run("foo(bar)", "javascript");
        assert_eq!(out.html, r#"<span class="hl-function">foo</span>(bar)"#);
    }

    #[test]
    fn test_keyword_call_left_for_keyword_pass() {
        let out = run("if(x)", "javascript");
        assert_eq!(out.html, r#"<span class="hl-keyword">if</span>(x)"#);
    }

    #[test]
    fn test_ledger_indices_restored_once_each() {
        let out = run("let a = 1; let b = 2;", "javascript");
        assert_eq!(out.spans, 4);
        assert_eq!(out.html.matches("<span ").count(), out.spans);
        assert_eq!(out.html.matches("</span>").count(), out.spans);
    }

    #[test]
    fn test_no_match_keeps_text() {
        let out = run("???", "rust");
        assert_eq!(out.html, "???");
        assert_eq!(out.spans, 0);
    }

    #[test]
    fn test_empty_input() {
        let out = run("", "rust");
        assert_eq!(out.html, "");
        assert_eq!(out.spans, 0);
    }
}
