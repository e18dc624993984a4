//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use ghostup_types::{InstallReport, StageOutcome};
use std::io;

/// Renders the final install report
#[derive(Clone, Copy)]
pub struct OutputRenderer {
    json_output: bool,
    colors_enabled: bool,
}

impl OutputRenderer {
    pub fn new(json_output: bool, colors_enabled: bool) -> Self {
        Self {
            json_output,
            colors_enabled,
        }
    }

    pub fn render_report(&self, report: &InstallReport) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        println!("{}", self.stage_table(report));
        match &report.binary_path {
            Some(path) => println!(
                "Ghostty {} installed at {} in {:.1}s",
                report.version,
                path.display(),
                seconds(report.duration_ms)
            ),
            None => println!(
                "Ghostty {} source staged in {:.1}s",
                report.version,
                seconds(report.duration_ms)
            ),
        }
        if !report.warnings.is_empty() {
            println!(
                "{} desktop integration step(s) need attention; see the warnings above.",
                report.warnings.len()
            );
        }
        Ok(())
    }

    fn stage_table(&self, report: &InstallReport) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.colors_enabled {
            table.force_no_tty();
        }

        table.set_header(vec![
            Cell::new("Stage").add_attribute(Attribute::Bold),
            Cell::new("Result").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
        ]);

        for record in &report.stages {
            let result = match &record.outcome {
                StageOutcome::Completed => Cell::new("done").fg(Color::Green),
                StageOutcome::AlreadySatisfied => Cell::new("cached").fg(Color::Blue),
                StageOutcome::Skipped { reason } => {
                    Cell::new(format!("skipped ({reason})")).fg(Color::DarkGrey)
                }
            };
            table.add_row(vec![
                Cell::new(record.stage),
                result,
                Cell::new(format!("{:.1}s", seconds(record.duration_ms))),
            ]);
        }
        table
    }
}

#[allow(clippy::cast_precision_loss)]
fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
