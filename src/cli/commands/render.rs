//! Render command implementation.
//!
//! Renders a message body to HTML, highlighting each fenced code block once.

use crate::cli::{Cli, OutputFormat, RenderArgs};
use crate::error::Result;
use crate::render::MessageRenderer;
use crate::util::{input_name, read_input, write_output};

/// Run the render command.
pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let config = cli.load_config()?;
    let text = read_input(args.file.as_deref())?;

    let mut renderer = MessageRenderer::from_config(&config)
        .dark_theme(args.dark || config.render.dark_theme);
    if let Some(title) = &args.title {
        renderer = renderer.with_title(title.clone());
    }

    let standalone = args.standalone || config.render.standalone;
    let html = if standalone {
        renderer.render_document(&text)
    } else {
        renderer.render(&text)
    };

    tracing::info!(
        input = %input_name(args.file.as_deref()),
        standalone,
        bytes = html.len(),
        "rendered message"
    );

    match (cli.effective_output(), &args.out) {
        (OutputFormat::Json, None) => {
            let output = serde_json::json!({
                "file": input_name(args.file.as_deref()),
                "standalone": standalone,
                "html": html,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        (_, out) => {
            write_output(out.as_deref(), &html)?;
            if let Some(path) = out {
                if !cli.quiet {
                    eprintln!("Wrote {}", path.display());
                }
            }
            Ok(())
        }
    }
}
