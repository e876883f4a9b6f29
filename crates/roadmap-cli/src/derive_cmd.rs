//! `roadmap derive` command: run the pipeline over a saved raw response.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use roadmap_core::derive_plan_traced;

use crate::render::{OutputFormat, render};

/// Read raw model output from `input` (or stdin) and print the derived plan.
pub fn run_derive(
    goal: &str,
    duration_hint: Option<i64>,
    input: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let raw = read_input(input)?;
    let derivation = derive_plan_traced(&raw, goal, duration_hint);
    print!("{}", render(&derivation, goal, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read response file: {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read response from stdin")?;
            Ok(raw)
        }
    }
}
