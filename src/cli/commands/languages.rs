//! Languages command implementation.

use std::collections::BTreeMap;

use crate::cli::{Cli, OutputFormat};
use crate::error::Result;
use crate::highlight::rules::{aliases, languages};

/// Run the languages command.
pub fn run(cli: &Cli) -> Result<()> {
    let table = language_table();

    match cli.effective_output() {
        OutputFormat::Json => {
            let output: Vec<_> = table
                .iter()
                .map(|(name, aliases)| serde_json::json!({ "language": name, "aliases": aliases }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for (name, aliases) in &table {
                if aliases.is_empty() {
                    println!("{name}");
                } else {
                    println!("{name:<12} {}", aliases.join(", "));
                }
            }
        }
    }

    Ok(())
}

/// Canonical languages (in table order) with their aliases.
fn language_table() -> Vec<(&'static str, Vec<&'static str>)> {
    let mut by_language: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (alias, canonical) in aliases() {
        by_language.entry(canonical).or_default().push(alias);
    }
    languages()
        .map(|name| (name, by_language.remove(name).unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table() {
        let table = language_table();
        assert_eq!(table[0].0, "javascript");
        assert!(table[0].1.contains(&"js"));

        let yaml = table.iter().find(|(name, _)| *name == "yaml").unwrap();
        assert_eq!(yaml.1, vec!["yml"]);

        let json = table.iter().find(|(name, _)| *name == "json").unwrap();
        assert!(json.1.is_empty());
    }
}
