//! Landmarks command implementation
//!
//! Prints the landmark table, with optional overrides applied.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use autorig_spec::{LandmarkSet, Side};
use colored::Colorize;

use crate::input::load_landmark_overrides;

/// Loads the default landmarks with any overrides from `overrides_path` applied.
pub fn resolve_landmarks(overrides_path: Option<&Path>) -> Result<LandmarkSet> {
    let landmarks = LandmarkSet::defaults();
    Ok(match overrides_path {
        Some(path) => landmarks.with_overrides(&load_landmark_overrides(path)?),
        None => landmarks,
    })
}

/// Run the landmarks command
pub fn run(overrides_path: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    let landmarks = resolve_landmarks(overrides_path)?;

    if json_output {
        let json = serde_json::to_string_pretty(&landmarks)
            .context("Failed to serialize landmarks")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Landmarks:".cyan().bold());
    for (name, [x, y, z]) in landmarks.iter() {
        let side = match name.side() {
            Side::Center => "center".dimmed(),
            Side::Left => "left".normal(),
            Side::Right => "right".normal(),
        };
        println!(
            "  {:<16} {:>7.3} {:>7.3} {:>7.3}  {}",
            name.as_str(),
            x,
            y,
            z,
            side
        );
    }
    println!(
        "\n{} {:.3}",
        "Max left/right asymmetry:".dimmed(),
        landmarks.max_asymmetry()
    );

    Ok(ExitCode::SUCCESS)
}
