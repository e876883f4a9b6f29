//! Output formatting for derived roadmaps.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use roadmap_core::{DayEntry, Derivation, PlanSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable day list
    #[default]
    Text,
    /// One JSON document on stdout
    Json,
}

/// JSON shape printed by `--format json`.
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    goal: &'a str,
    source: PlanSource,
    estimated_duration: u32,
    degradations: Vec<String>,
    entries: &'a [DayEntry],
}

/// Render a derivation for stdout.
pub fn render(derivation: &Derivation, goal: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(derivation, goal)),
        OutputFormat::Json => {
            let report = PlanReport {
                goal,
                source: derivation.source,
                estimated_duration: derivation.plan.estimated_duration(),
                degradations: derivation
                    .degradations
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                entries: derivation.plan.entries(),
            };
            serde_json::to_string_pretty(&report).context("failed to serialize roadmap")
        }
    }
}

fn render_text(derivation: &Derivation, goal: &str) -> String {
    let plan = &derivation.plan;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Roadmap: {goal}");
    let _ = writeln!(out, "  Source:    {}", derivation.source);
    let _ = writeln!(out, "  Duration:  {} days", plan.estimated_duration());
    let _ = writeln!(out, "  Entries:   {}", plan.entries().len());

    if !derivation.degradations.is_empty() {
        out.push('\n');
        out.push_str("Warnings:\n");
        for e in &derivation.degradations {
            let _ = writeln!(out, "  - {e}");
        }
    }

    for entry in plan.entries() {
        out.push('\n');
        let _ = writeln!(out, "Day {}: {}", entry.day_index, entry.title);
        let _ = writeln!(out, "    {}", entry.description);
        for tip in &entry.tips {
            let _ = writeln!(out, "    * {tip}");
        }
    }

    out
}
