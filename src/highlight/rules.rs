//! Per-language lexical rules and the alias map.
//!
//! Rules are declared as plain static data ([`LanguageRules`]) and compiled
//! once, on first use, into [`CompiledRules`]. Both tables are read-only for
//! the life of the process.
//!
//! Patterns operate on *escaped* text: `<`, `>` and `&` appear as `&lt;`,
//! `&gt;` and `&amp;`. When a pattern contains capture groups, the first
//! group that participates in a match is the classified span and the rest
//! of the match stays plain text.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::Category;

/// Declarative lexical rules for one language.
///
/// Every field is optional; `None` means "do not classify this category".
#[derive(Debug, Clone, Copy)]
pub struct LanguageRules {
    /// Reserved words.
    pub keywords: Option<&'static [&'static str]>,
    /// Primitive and well-known type names.
    pub types: Option<&'static [&'static str]>,
    /// Built-in functions, objects and constants.
    pub builtins: Option<&'static [&'static str]>,
    /// String literal pattern.
    pub strings: Option<&'static str>,
    /// Comment pattern.
    pub comments: Option<&'static str>,
    /// Numeric literal pattern.
    pub numbers: Option<&'static str>,
    /// Function-name pattern (identifier followed by a call parenthesis).
    pub functions: Option<&'static str>,
    /// Match word lists without regard to case (SQL).
    pub case_insensitive_words: bool,
}

impl LanguageRules {
    /// Rules that classify nothing; base for struct-update syntax.
    pub const EMPTY: Self = Self {
        keywords: None,
        types: None,
        builtins: None,
        strings: None,
        comments: None,
        numbers: None,
        functions: None,
        case_insensitive_words: false,
    };
}

/// One compiled classification pass.
#[derive(Debug)]
pub struct Pass {
    /// Category assigned to every match of this pass.
    pub category: Category,
    /// Compiled pattern.
    pub regex: Regex,
}

/// Compiled rules for one language, with passes in priority order.
#[derive(Debug)]
pub struct CompiledRules {
    name: &'static str,
    passes: Vec<Pass>,
    keywords: HashSet<String>,
    case_insensitive_words: bool,
}

impl CompiledRules {
    fn compile(name: &'static str, rules: &LanguageRules) -> Self {
        let ci = rules.case_insensitive_words;
        let mut passes = Vec::new();

        let mut push_pattern = |category: Category, pattern: Option<&str>| {
            if let Some(pattern) = pattern {
                passes.push(Pass {
                    category,
                    regex: Regex::new(pattern).unwrap_or_else(|e| {
                        panic!("invalid built-in {category:?} pattern for {name}: {e}")
                    }),
                });
            }
        };
        push_pattern(Category::Comment, rules.comments);
        push_pattern(Category::String, rules.strings);
        push_pattern(Category::Number, rules.numbers);
        push_pattern(Category::Function, rules.functions);

        for (category, words) in [
            (Category::Keyword, rules.keywords),
            (Category::Type, rules.types),
            (Category::Builtin, rules.builtins),
        ] {
            if let Some(words) = words.filter(|w| !w.is_empty()) {
                passes.push(Pass {
                    category,
                    regex: word_alternation(words, ci),
                });
            }
        }

        let keywords = rules
            .keywords
            .unwrap_or_default()
            .iter()
            .map(|w| if ci { w.to_lowercase() } else { (*w).to_string() })
            .collect();

        Self {
            name,
            passes,
            keywords,
            case_insensitive_words: ci,
        }
    }

    /// Canonical language key.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Passes in the order they must run.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Whether `word` is one of this language's keywords.
    pub fn is_keyword(&self, word: &str) -> bool {
        if self.case_insensitive_words {
            self.keywords.contains(&word.to_lowercase())
        } else {
            self.keywords.contains(word)
        }
    }
}

fn word_alternation(words: &[&str], case_insensitive: bool) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let flags = if case_insensitive { "(?i)" } else { "" };
    Regex::new(&format!(r"{flags}\b(?:{alternation})\b"))
        .unwrap_or_else(|e| panic!("invalid built-in word list: {e}"))
}

// Shared patterns.

/// `//` line comments (not after `:` so URLs survive) and `/* */` blocks.
const C_COMMENTS: &str = r"(?m)(?:^|[^:\\])(//[^\n]*)|(/\*[\s\S]*?\*/)";
const HASH_COMMENTS: &str = r"#[^\n]*";
/// `#` comments only at line start or after whitespace, so `$#` and `${#x}` stay code.
const SHELL_COMMENTS: &str = r"(?m)(?:^|[ \t])(#[^\n]*)";
const DOUBLE_SINGLE_STRINGS: &str = r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#;
const JS_STRINGS: &str = r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`"#;
const NUMBERS: &str = r"\b(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)\b";
const CALLS: &str = r"\b([A-Za-z_]\w*)\(";

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "while", "with", "yield",
];

const JS_TYPES: &[&str] = &[
    "Array", "BigInt", "Boolean", "Date", "Error", "Map", "Number", "Object", "Promise",
    "RegExp", "Set", "String", "Symbol", "WeakMap", "WeakSet",
];

const JS_BUILTINS: &[&str] = &[
    "JSON", "Math", "console", "document", "exports", "fetch", "globalThis", "module",
    "parseFloat", "parseInt", "process", "require", "setInterval", "setTimeout", "window",
];

static JAVASCRIPT: LanguageRules = LanguageRules {
    keywords: Some(JS_KEYWORDS),
    types: Some(JS_TYPES),
    builtins: Some(JS_BUILTINS),
    strings: Some(JS_STRINGS),
    comments: Some(C_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static TYPESCRIPT: LanguageRules = LanguageRules {
    keywords: Some(&[
        "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
        "continue", "declare", "default", "delete", "do", "else", "enum", "export", "extends",
        "false", "finally", "for", "from", "function", "if", "implements", "import", "in",
        "infer", "instanceof", "interface", "is", "keyof", "let", "namespace", "new", "null",
        "of", "private", "protected", "public", "readonly", "return", "satisfies", "static",
        "super", "switch", "this", "throw", "true", "try", "type", "typeof", "undefined", "var",
        "void", "while", "yield",
    ]),
    types: Some(&[
        "any", "bigint", "boolean", "never", "number", "object", "string", "symbol", "unknown",
        "Array", "Date", "Error", "Map", "Partial", "Pick", "Promise", "Readonly", "Record",
        "Set", "Omit",
    ]),
    builtins: Some(JS_BUILTINS),
    strings: Some(JS_STRINGS),
    comments: Some(C_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static PYTHON: LanguageRules = LanguageRules {
    keywords: Some(&[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "match", "nonlocal", "not", "or", "pass", "raise",
        "return", "try", "while", "with", "yield",
    ]),
    types: Some(&[
        "bool", "bytearray", "bytes", "complex", "dict", "float", "frozenset", "int", "list",
        "object", "set", "str", "tuple",
    ]),
    builtins: Some(&[
        "abs", "all", "any", "enumerate", "filter", "getattr", "hasattr", "isinstance", "len",
        "map", "max", "min", "open", "print", "range", "reversed", "self", "setattr", "sorted",
        "sum", "super", "zip",
    ]),
    strings: Some(
        r#"(?:\b[rRbBfFuU]{1,2})?(?:"""[\s\S]*?"""|'''[\s\S]*?'''|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')"#,
    ),
    comments: Some(HASH_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static BASH: LanguageRules = LanguageRules {
    keywords: Some(&[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "readonly", "return", "select", "then", "until", "while",
    ]),
    builtins: Some(&[
        "alias", "cat", "cd", "chmod", "cp", "curl", "echo", "eval", "exec", "exit", "git",
        "grep", "ls", "mkdir", "mv", "npm", "printf", "pwd", "read", "rm", "sed", "set", "shift",
        "source", "sudo", "test", "touch", "trap", "unset",
    ]),
    strings: Some(r#""(?:[^"\\]|\\.)*"|'[^']*'"#),
    comments: Some(SHELL_COMMENTS),
    numbers: Some(r"\b\d+\b"),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static JSON: LanguageRules = LanguageRules {
    keywords: Some(&["true", "false", "null"]),
    strings: Some(r#""(?:[^"\\\n]|\\.)*""#),
    numbers: Some(r"\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b"),
    ..LanguageRules::EMPTY
};

static HTML: LanguageRules = LanguageRules {
    keywords: Some(&[
        "a", "body", "br", "button", "div", "footer", "form", "h1", "h2", "h3", "head",
        "header", "html", "img", "input", "label", "li", "link", "main", "meta", "nav", "ol",
        "option", "p", "pre", "script", "section", "select", "span", "style", "table", "tbody",
        "td", "template", "textarea", "th", "thead", "title", "tr", "ul",
    ]),
    builtins: Some(&[
        "alt", "charset", "class", "content", "disabled", "for", "height", "href", "id", "lang",
        "name", "placeholder", "rel", "src", "type", "value", "width",
    ]),
    strings: Some(r#""[^"]*"|'[^']*'"#),
    comments: Some(r"&lt;!--[\s\S]*?--&gt;"),
    ..LanguageRules::EMPTY
};

static CSS: LanguageRules = LanguageRules {
    keywords: Some(&[
        "auto", "block", "bold", "flex", "grid", "hidden", "important", "inherit", "initial",
        "inline", "none", "relative", "absolute", "fixed", "solid", "transparent",
    ]),
    builtins: Some(&[
        "calc", "hsl", "hsla", "linear-gradient", "rgb", "rgba", "url", "var",
    ]),
    strings: Some(DOUBLE_SINGLE_STRINGS),
    comments: Some(r"/\*[\s\S]*?\*/"),
    numbers: Some(r"#[0-9a-fA-F]{3,8}\b|\b\d+(?:\.\d+)?(?:px|em|rem|vh|vw|ms|s|deg|fr|%)?"),
    ..LanguageRules::EMPTY
};

static RUST: LanguageRules = LanguageRules {
    keywords: Some(&[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while",
    ]),
    types: Some(&[
        "Arc", "BTreeMap", "Box", "HashMap", "HashSet", "Option", "Rc", "Result", "String",
        "Vec", "bool", "char", "f32", "f64", "i128", "i16", "i32", "i64", "i8", "isize", "str",
        "u128", "u16", "u32", "u64", "u8", "usize",
    ]),
    builtins: Some(&[
        "Err", "None", "Ok", "Some", "assert", "assert_eq", "eprintln", "format", "panic",
        "println", "todo", "unreachable", "vec",
    ]),
    strings: Some(r#"b?"(?:[^"\\]|\\.)*"|'(?:[^'\\\n]|\\.)'"#),
    comments: Some(C_COMMENTS),
    numbers: Some(
        r"\b(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)(?:[iuf](?:8|16|32|64|128|size))?\b",
    ),
    functions: Some(r"\b([A-Za-z_]\w*!?)\("),
    ..LanguageRules::EMPTY
};

static GO: LanguageRules = LanguageRules {
    keywords: Some(&[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "false", "for", "func", "go", "goto", "if", "import", "interface", "iota", "map", "nil",
        "package", "range", "return", "select", "struct", "switch", "true", "type", "var",
    ]),
    types: Some(&[
        "any", "bool", "byte", "complex128", "complex64", "error", "float32", "float64", "int",
        "int16", "int32", "int64", "int8", "rune", "string", "uint", "uint16", "uint32",
        "uint64", "uint8", "uintptr",
    ]),
    builtins: Some(&[
        "append", "cap", "close", "copy", "delete", "fmt", "len", "make", "new", "panic",
        "print", "println", "recover",
    ]),
    strings: Some(r#""(?:[^"\\\n]|\\.)*"|`[^`]*`|'(?:[^'\\\n]|\\.)'"#),
    comments: Some(C_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static JAVA: LanguageRules = LanguageRules {
    keywords: Some(&[
        "abstract", "assert", "break", "case", "catch", "class", "continue", "default", "do",
        "else", "enum", "extends", "false", "final", "finally", "for", "if", "implements",
        "import", "instanceof", "interface", "new", "null", "package", "private", "protected",
        "public", "record", "return", "static", "super", "switch", "synchronized", "this",
        "throw", "throws", "true", "try", "var", "void", "volatile", "while",
    ]),
    types: Some(&[
        "ArrayList", "Boolean", "Double", "HashMap", "Integer", "List", "Long", "Map", "Object",
        "Optional", "Set", "String", "boolean", "byte", "char", "double", "float", "int", "long",
        "short",
    ]),
    builtins: Some(&["Math", "System", "out", "println"]),
    strings: Some(DOUBLE_SINGLE_STRINGS),
    comments: Some(C_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

const C_KEYWORDS: &[&str] = &[
    "NULL", "auto", "break", "case", "const", "continue", "default", "do", "else", "enum",
    "extern", "false", "for", "goto", "if", "inline", "register", "restrict", "return",
    "sizeof", "static", "struct", "switch", "true", "typedef", "union", "volatile", "while",
];

const C_TYPES: &[&str] = &[
    "FILE", "bool", "char", "double", "float", "int", "int16_t", "int32_t", "int64_t", "int8_t",
    "long", "short", "signed", "size_t", "uint16_t", "uint32_t", "uint64_t", "uint8_t",
    "unsigned", "void",
];

static C: LanguageRules = LanguageRules {
    keywords: Some(C_KEYWORDS),
    types: Some(C_TYPES),
    builtins: Some(&[
        "fclose", "fopen", "fprintf", "free", "malloc", "memcpy", "memset", "printf", "scanf",
        "strcmp", "strlen",
    ]),
    strings: Some(DOUBLE_SINGLE_STRINGS),
    comments: Some(C_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static CPP: LanguageRules = LanguageRules {
    keywords: Some(&[
        "NULL", "auto", "break", "case", "catch", "class", "const", "constexpr", "continue",
        "default", "delete", "do", "else", "enum", "explicit", "extern", "false", "for",
        "friend", "goto", "if", "inline", "namespace", "new", "noexcept", "nullptr", "operator",
        "override", "private", "protected", "public", "return", "sizeof", "static",
        "static_cast", "struct", "switch", "template", "this", "throw", "true", "try",
        "typedef", "typename", "union", "using", "virtual", "volatile", "while",
    ]),
    types: Some(&[
        "bool", "char", "double", "float", "int", "long", "map", "shared_ptr", "short",
        "signed", "size_t", "string", "unique_ptr", "unsigned", "vector", "void",
    ]),
    builtins: Some(&["cerr", "cin", "cout", "endl", "printf", "std"]),
    strings: Some(DOUBLE_SINGLE_STRINGS),
    comments: Some(C_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static SQL: LanguageRules = LanguageRules {
    keywords: Some(&[
        "add", "alter", "and", "as", "asc", "begin", "between", "by", "case", "commit",
        "create", "delete", "desc", "distinct", "drop", "else", "end", "exists", "from",
        "group", "having", "if", "in", "index", "inner", "insert", "into", "is", "join", "key",
        "left", "like", "limit", "not", "null", "offset", "on", "or", "order", "outer",
        "primary", "references", "right", "rollback", "select", "set", "table", "then", "union",
        "update", "values", "view", "when", "where", "with",
    ]),
    types: Some(&[
        "bigint", "blob", "boolean", "char", "date", "decimal", "float", "int", "integer",
        "json", "numeric", "real", "serial", "text", "timestamp", "uuid", "varchar",
    ]),
    builtins: Some(&["avg", "coalesce", "count", "max", "min", "now", "sum"]),
    strings: Some(r"'(?:[^']|'')*'"),
    comments: Some(r"--[^\n]*|/\*[\s\S]*?\*/"),
    numbers: Some(r"\b\d+(?:\.\d+)?\b"),
    functions: Some(CALLS),
    case_insensitive_words: true,
};

static RUBY: LanguageRules = LanguageRules {
    keywords: Some(&[
        "begin", "break", "case", "class", "def", "do", "else", "elsif", "end", "ensure",
        "false", "for", "if", "in", "module", "next", "nil", "rescue", "return", "self", "then",
        "true", "unless", "until", "when", "while", "yield",
    ]),
    builtins: Some(&[
        "attr_accessor", "attr_reader", "attr_writer", "include", "lambda", "p", "proc", "puts",
        "raise", "require", "require_relative",
    ]),
    strings: Some(DOUBLE_SINGLE_STRINGS),
    comments: Some(HASH_COMMENTS),
    numbers: Some(NUMBERS),
    functions: Some(CALLS),
    ..LanguageRules::EMPTY
};

static YAML: LanguageRules = LanguageRules {
    keywords: Some(&["false", "no", "null", "off", "on", "true", "yes"]),
    strings: Some(DOUBLE_SINGLE_STRINGS),
    comments: Some(SHELL_COMMENTS),
    numbers: Some(r"\b\d+(?:\.\d+)?\b"),
    ..LanguageRules::EMPTY
};

/// Canonical language keys and their rules.
static LANGUAGES: &[(&str, &LanguageRules)] = &[
    ("javascript", &JAVASCRIPT),
    ("typescript", &TYPESCRIPT),
    ("python", &PYTHON),
    ("bash", &BASH),
    ("json", &JSON),
    ("html", &HTML),
    ("css", &CSS),
    ("rust", &RUST),
    ("go", &GO),
    ("java", &JAVA),
    ("c", &C),
    ("cpp", &CPP),
    ("sql", &SQL),
    ("ruby", &RUBY),
    ("yaml", &YAML),
];

/// Short names and file extensions mapped to canonical keys.
static ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("node", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("python3", "python"),
    ("sh", "bash"),
    ("zsh", "bash"),
    ("shell", "bash"),
    ("console", "bash"),
    ("htm", "html"),
    ("xml", "html"),
    ("rs", "rust"),
    ("golang", "go"),
    ("h", "c"),
    ("c++", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("rb", "ruby"),
    ("yml", "yaml"),
    ("postgres", "sql"),
    ("postgresql", "sql"),
    ("sqlite", "sql"),
];

static COMPILED: Lazy<HashMap<&'static str, CompiledRules>> = Lazy::new(|| {
    LANGUAGES
        .iter()
        .map(|(name, rules)| (*name, CompiledRules::compile(name, rules)))
        .collect()
});

/// Resolve a language tag (case-insensitive, alias-aware) to its canonical key.
///
/// Returns `None` for unknown tags, which callers treat as "no rules".
pub fn resolve_language(tag: &str) -> Option<&'static str> {
    let tag = tag.trim().to_ascii_lowercase();
    if tag.is_empty() {
        return None;
    }
    let target = ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map_or(tag.as_str(), |(_, canonical)| *canonical);
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == target)
        .map(|(name, _)| *name)
}

/// Look up compiled rules for a language tag.
pub fn rules_for(tag: &str) -> Option<&'static CompiledRules> {
    resolve_language(tag).and_then(|name| COMPILED.get(name))
}

/// Declarative rules for a canonical language key.
pub fn language_rules(name: &str) -> Option<&'static LanguageRules> {
    LANGUAGES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, rules)| *rules)
}

/// Canonical language keys, in table order.
pub fn languages() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|(name, _)| *name)
}

/// `(alias, canonical)` pairs.
pub fn aliases() -> impl Iterator<Item = (&'static str, &'static str)> {
    ALIASES.iter().copied()
}
