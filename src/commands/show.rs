//! Show command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::ShowArgs;
use crate::commands::helpers::open_home;
use crate::domain::ProvisionedState;
use crate::error::Result;

pub fn run(home: Option<PathBuf>, args: ShowArgs) -> Result<()> {
    let home = open_home(home)?;
    let record = home.record()?;

    println!("{}", render(&record.state, args.parameters, false));
    Ok(())
}

/// Render the provisioned state, one feature pack per block
fn render(state: &ProvisionedState, parameters: bool, plain: bool) -> String {
    let (heading, name, detail) = if plain {
        (Style::new(), Style::new(), Style::new())
    } else {
        (
            Style::new().green().bold(),
            Style::new().cyan(),
            Style::new().dim(),
        )
    };

    let mut out = Vec::new();
    for feature_pack in &state.feature_packs {
        out.push(heading.apply_to(feature_pack.coordinate.to_string()).to_string());
        if feature_pack.packages.is_empty() {
            out.push(format!("  {}", detail.apply_to("(no packages)")));
        }
        for package in &feature_pack.packages {
            out.push(format!("  {}", name.apply_to(&package.name)));
            if parameters {
                for (param, value) in &package.parameters {
                    out.push(format!("    {}", detail.apply_to(format!("{param} = {value}"))));
                }
            }
        }
    }
    out.join("\n")
}
