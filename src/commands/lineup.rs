//! Lineup command implementation

use crate::cli::LineupArgs;
use crate::config::LineupFile;
use crate::error::Result;
use crate::lineup::{self, LinedUp, Schema};

pub fn run(args: LineupArgs) -> Result<()> {
    let file = LineupFile::load(&args.file)?;
    let schema = file.schema()?;
    let ordered = lineup::lineup(&schema, &file.configs)?;

    for line in render(&schema, &ordered) {
        println!("{line}");
    }
    Ok(())
}

/// One line per fragment: label followed by its parameters
fn render(schema: &Schema, ordered: &[LinedUp]) -> Vec<String> {
    ordered
        .iter()
        .map(|entry| {
            let label = entry.label(schema);
            if entry.config.params.is_empty() {
                label
            } else {
                let params = entry
                    .config
                    .params
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{label} [{params}]")
            }
        })
        .collect()
}
