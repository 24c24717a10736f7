//! Command-line interface for claude-history.
//!
//! Commands:
//! - `highlight`: highlight source files (or stdin) to HTML
//! - `detect`: guess the language of a snippet
//! - `render`: render a message body with fenced code blocks
//! - `languages`: list supported languages and aliases
//! - `config`: view and initialize configuration
//! - `completions`: generate shell completions

mod commands;

pub use commands::*;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::config::{Config, ConfigOverlay};
use crate::error::Result;

/// Highlight and render code from Claude Code conversation history.
#[derive(Debug, Parser)]
#[command(name = "claude-history")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for structured data.
    #[arg(short = 'o', long, global = true, default_value = "text", env = "CLAUDE_HISTORY_OUTPUT")]
    pub output: OutputFormat,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true, env = "CLAUDE_HISTORY_QUIET")]
    pub quiet: bool,

    /// Output as JSON (shorthand for -o json).
    #[arg(long, global = true, env = "CLAUDE_HISTORY_JSON")]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "CLAUDE_HISTORY_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "CLAUDE_HISTORY_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Number of threads for parallel highlighting (default: number of CPUs).
    #[arg(short = 'j', long, global = true, env = "CLAUDE_HISTORY_THREADS")]
    pub threads: Option<usize>,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "CLAUDE_HISTORY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (HTML for highlight/render).
    #[default]
    Text,
    /// JSON objects.
    Json,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }

    /// Load the default configuration, layered with `--config` if given.
    ///
    /// An explicit `--config` path must load; a broken default file only warns.
    /// Only keys present in the `--config` file override the default file.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable default config");
            Config::default()
        });
        if let Some(path) = &self.config {
            config.merge_from(&ConfigOverlay::load_from(path)?);
            config.validate()?;
        }
        Ok(config)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Highlight source files (or stdin) as HTML.
    #[command(alias = "hl")]
    Highlight(HighlightArgs),

    /// Guess the language of a snippet.
    Detect(DetectArgs),

    /// Render a message body with fenced code blocks highlighted.
    Render(RenderArgs),

    /// List supported languages and aliases.
    #[command(alias = "langs")]
    Languages,

    /// View and initialize configuration.
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the highlight command.
#[derive(Debug, Clone, clap::Args)]
pub struct HighlightArgs {
    /// Files to highlight (reads stdin when omitted or `-`).
    pub files: Vec<PathBuf>,

    /// Language tag or alias (overrides extension and detection).
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Do not guess the language of untagged input.
    #[arg(long)]
    pub no_detect: bool,

    /// Wrap each result in `<pre><code>`.
    #[arg(long)]
    pub wrap: bool,
}

/// Arguments for the detect command.
#[derive(Debug, Clone, clap::Args)]
pub struct DetectArgs {
    /// File to inspect (reads stdin when omitted or `-`).
    pub file: Option<PathBuf>,
}

/// Arguments for the render command.
#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Message text to render (reads stdin when omitted or `-`).
    pub file: Option<PathBuf>,

    /// Emit a complete HTML document.
    #[arg(short = 's', long)]
    pub standalone: bool,

    /// Use the dark stylesheet (with --standalone).
    #[arg(long)]
    pub dark: bool,

    /// Document title (with --standalone).
    #[arg(long)]
    pub title: Option<String>,

    /// Write output to a file instead of stdout.
    #[arg(long = "out")]
    pub out: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Config action.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,
    /// Print the configuration file path.
    Path,
    /// Write a default configuration file if none exists.
    Init,
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Supported shells for completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    /// Bash.
    Bash,
    /// Zsh.
    Zsh,
    /// Fish.
    Fish,
    /// PowerShell.
    PowerShell,
    /// Elvish.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    generate(Shell::from(shell), &mut cmd, "claude-history", &mut io::stdout());
}

/// Initialize tracing/logging based on CLI options.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let result = tracing_subscriber::registry()
        .with(log_layer(cli.log_format))
        .with(filter)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Build the stderr formatting layer for a log format.
fn log_layer(
    format: LogFormat,
) -> Box<dyn tracing_subscriber::Layer<tracing_subscriber::Registry> + Send + Sync> {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        Layer,
    };

    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .without_time()
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

/// Configure rayon's global pool for multi-file highlighting.
fn init_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads.filter(|n| *n > 0) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }
}

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_thread_pool(cli.threads);
    init_logging(&cli);

    match &cli.command {
        Commands::Highlight(args) => commands::highlight::run(&cli, args),
        Commands::Detect(args) => commands::detect::run(&cli, args),
        Commands::Render(args) => commands::render::run(&cli, args),
        Commands::Languages => commands::languages::run(&cli),
        Commands::Config(args) => commands::config::run(&cli, args),
        Commands::Completions(args) => {
            generate_completions(args.shell);
            Ok(())
        }
    }
}
