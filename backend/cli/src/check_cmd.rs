//! `kupo check`: config diagnosis.

use std::path::Path;

use anyhow::Result;
use kupo_config::ValidationReport;

use crate::terminal_output::{note_error, note_info, note_success, render_table, Column};

pub fn run(path: &Path, report: &ValidationReport) -> Result<()> {
    if path.exists() {
        note_info(&format!("Config: {}", path.display()));
    } else {
        note_info(&format!("No config at {}; using defaults", path.display()));
    }

    let rows: Vec<Vec<String>> = report
        .errors
        .iter()
        .map(|e| ("error", e))
        .chain(report.warnings.iter().map(|w| ("warning", w)))
        .map(|(level, issue)| vec![level.to_string(), issue.path.clone(), issue.message.clone()])
        .collect();

    if !rows.is_empty() {
        let columns = [Column::left("Level"), Column::left("Field"), Column::left("Problem")];
        print!("{}", render_table(&columns, &rows));
    }

    if report.is_valid() {
        note_success(&format!("Config is valid ({} warning(s))", report.warnings.len()));
        Ok(())
    } else {
        note_error(&format!("Config has {} error(s)", report.errors.len()));
        anyhow::bail!("invalid config")
    }
}
