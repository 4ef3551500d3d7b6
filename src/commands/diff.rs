//! Diff command implementation

use std::path::PathBuf;

use console::Style;

use crate::commands::helpers::{open_home, open_repository};
use crate::error::Result;
use crate::operations::{DiffReport, Provisioner};

pub fn run(home: Option<PathBuf>, repository: Option<PathBuf>) -> Result<()> {
    let home = open_home(home)?;
    let repository = open_repository(repository)?;

    let report = Provisioner::new(&home, &repository).diff()?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &DiffReport) {
    if report.is_empty() {
        println!("No changes");
        return;
    }

    let added = Style::new().green();
    let removed = Style::new().red();
    let modified = Style::new().yellow();

    for path in &report.added {
        println!("{} {path}", added.apply_to("+"));
    }
    for path in &report.removed {
        println!("{} {path}", removed.apply_to("-"));
    }
    for path in &report.modified {
        println!("{} {path}", modified.apply_to("~"));
    }
}
