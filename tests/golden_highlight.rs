//! Golden-output tests for the highlighter using insta inline snapshots.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use claude_history::highlight::{highlight, Highlighter};
use claude_history::render::MessageRenderer;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn string_literal_is_one_span() {
    assert_snapshot!(
        highlight(r#"const x = "function() {}";"#, Some("javascript")),
        @r#"<span class="hl-keyword">const</span> x = <span class="hl-string">"function() {}"</span>;"#
    );
}

#[test]
fn url_inside_string_is_not_a_comment() {
    assert_snapshot!(
        highlight(r#"fetch("http://x.io") // go"#, Some("js")),
        @r#"<span class="hl-function">fetch</span>(<span class="hl-string">"http://x.io"</span>) <span class="hl-comment">// go</span>"#
    );
}

#[test]
fn escaped_operators_stay_plain() {
    assert_snapshot!(
        highlight("if (a < b && c) {}", Some("javascript")),
        @r#"<span class="hl-keyword">if</span> (a &lt; b &amp;&amp; c) {}"#
    );
}

#[test]
fn rust_macro_call_and_suffixed_number() {
    assert_snapshot!(
        highlight(r#"fn main() { println!("{}", 42u8); }"#, Some("rs")),
        @r#"<span class="hl-keyword">fn</span> <span class="hl-function">main</span>() { <span class="hl-function">println!</span>(<span class="hl-string">"{}"</span>, <span class="hl-number">42u8</span>); }"#
    );
}

#[test]
fn sql_keywords_ignore_case() {
    assert_snapshot!(
        highlight("SELECT name FROM users WHERE id = 1; -- fetch", Some("sql")),
        @r#"<span class="hl-keyword">SELECT</span> name <span class="hl-keyword">FROM</span> users <span class="hl-keyword">WHERE</span> id = <span class="hl-number">1</span>; <span class="hl-comment">-- fetch</span>"#
    );
}

#[test]
fn html_tags_and_attributes() {
    assert_snapshot!(
        highlight(r#"<a href="x">hi</a>"#, Some("html")),
        @r#"&lt;<span class="hl-keyword">a</span> <span class="hl-builtin">href</span>=<span class="hl-string">"x"</span>&gt;hi&lt;/<span class="hl-keyword">a</span>&gt;"#
    );
}

#[rstest]
#[case::python(
    "python",
    "def greet(name):\n    print(f\"hi {name}\")  # say hi",
    "<span class=\"hl-keyword\">def</span> <span class=\"hl-function\">greet</span>(name):\n    \
     <span class=\"hl-function\">print</span>(<span class=\"hl-string\">f\"hi {name}\"</span>)  \
     <span class=\"hl-comment\"># say hi</span>"
)]
#[case::json(
    "json",
    r#"{"ok": true, "n": 3}"#,
    r#"{<span class="hl-string">"ok"</span>: <span class="hl-keyword">true</span>, <span class="hl-string">"n"</span>: <span class="hl-number">3</span>}"#
)]
#[case::bash(
    "sh",
    r#"echo "$HOME" # home"#,
    r#"<span class="hl-builtin">echo</span> <span class="hl-string">"$HOME"</span> <span class="hl-comment"># home</span>"#
)]
#[case::css(
    "css",
    ".btn { color: #fff; margin: 4px; }",
    r#".btn { color: <span class="hl-number">#fff</span>; margin: <span class="hl-number">4px</span>; }"#
)]
#[case::go(
    "golang",
    "func add(a int) int { return a + 1 }",
    r#"<span class="hl-keyword">func</span> <span class="hl-function">add</span>(a <span class="hl-type">int</span>) <span class="hl-type">int</span> { <span class="hl-keyword">return</span> a + <span class="hl-number">1</span> }"#
)]
#[case::unknown("brainfuck", "<b>&</b>", "&lt;b&gt;&amp;&lt;/b&gt;")]
fn highlights_language(#[case] lang: &str, #[case] code: &str, #[case] expected: &str) {
    assert_eq!(highlight(code, Some(lang)), expected);
}

#[test]
fn output_is_final_markup() {
    let once = highlight("let x = 1;", Some("rust"));
    let twice = highlight(&once, Some("rust"));
    assert_ne!(once, twice);
    assert!(twice.contains("&lt;span class="));
}

#[test]
fn config_alias_reaches_renderer() {
    let highlighter = Highlighter::new().with_alias("jsonc", "json");
    let html = MessageRenderer::new(highlighter).render("```jsonc\n[1]\n```");
    assert_eq!(
        html,
        "<pre class=\"code-block\"><code class=\"language-json\">[<span class=\"hl-number\">1</span>]</code></pre>\n"
    );
}
