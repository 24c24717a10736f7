//! Detect command implementation.

use crate::cli::{Cli, DetectArgs, OutputFormat};
use crate::error::Result;
use crate::highlight::detect_language;
use crate::util::{input_name, read_input};

/// Run the detect command.
pub fn run(cli: &Cli, args: &DetectArgs) -> Result<()> {
    let path = args.file.as_deref();
    let code = read_input(path)?;
    let language = detect_language(&code);
    tracing::debug!(file = %input_name(path), language = ?language, "detection finished");

    match cli.effective_output() {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": input_name(path),
                "language": language,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", language.unwrap_or("none"));
        }
    }

    Ok(())
}
