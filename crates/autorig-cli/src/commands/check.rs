//! Check command implementation
//!
//! Runs every landmark check at once and lists all violations, instead of
//! stopping at the first like the pipeline's validate stage.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use autorig_spec::{validate_all, LandmarkViolation};
use colored::Colorize;
use serde::Serialize;

use super::landmarks::resolve_landmarks;
use crate::input::load_config_or_default;

/// One violation in machine-readable form.
#[derive(Debug, Serialize)]
pub struct ViolationEntry {
    pub rule: &'static str,
    pub message: String,
}

impl From<&LandmarkViolation> for ViolationEntry {
    fn from(violation: &LandmarkViolation) -> Self {
        Self {
            rule: violation.rule(),
            message: violation.to_string(),
        }
    }
}

/// Machine-readable check output.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub tolerance: f64,
    pub violations: Vec<ViolationEntry>,
}

/// Checks the landmarks and collects every violation.
pub fn check(landmarks_path: Option<&Path>, config_path: Option<&Path>) -> Result<CheckOutput> {
    let config = load_config_or_default(config_path)?;
    let landmarks = resolve_landmarks(landmarks_path)?;
    let violations = validate_all(&landmarks, config.symmetry_tolerance);
    Ok(CheckOutput {
        valid: violations.is_empty(),
        tolerance: config.symmetry_tolerance,
        violations: violations.iter().map(ViolationEntry::from).collect(),
    })
}

/// Run the check command
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 otherwise
pub fn run(
    landmarks_path: Option<&Path>,
    config_path: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    let output = check(landmarks_path, config_path)?;

    if json_output {
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize check output")?;
        println!("{}", json);
    } else {
        println!(
            "{} tolerance {}",
            "Checking landmarks:".cyan().bold(),
            output.tolerance
        );
        for entry in &output.violations {
            println!("  {} {} {}", "x".red(), entry.rule.bold(), entry.message);
        }
        if output.valid {
            println!("{} all checks passed", "OK".green().bold());
        } else {
            println!(
                "{} {} violation(s)",
                "FAILED".red().bold(),
                output.violations.len()
            );
        }
    }

    Ok(if output.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_defaults_pass() {
        let output = check(None, None).unwrap();
        assert!(output.valid);
        assert!(output.violations.is_empty());
        assert_eq!(output.tolerance, 0.1);
    }

    #[test]
    fn test_collects_every_violation() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("landmarks.json");
        fs::write(
            &path,
            r#"{"head": [0.0, 0.0, 1.0], "right_hip": [0.1, 0.0, 0.5]}"#,
        )
        .unwrap();

        let output = check(Some(&path), None).unwrap();
        assert!(!output.valid);
        let rules: Vec<&str> = output.violations.iter().map(|v| v.rule).collect();
        assert_eq!(rules, vec!["head_above_neck", "hips_level"]);
    }

    #[test]
    fn test_tolerance_comes_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        let landmarks = tmp.path().join("landmarks.json");
        fs::write(&landmarks, r#"{"right_hip": [0.1, 0.0, 0.6]}"#).unwrap();
        let config = tmp.path().join("rig.json");
        fs::write(&config, r#"{"symmetry_tolerance": 0.5}"#).unwrap();

        assert!(!check(Some(&landmarks), None).unwrap().valid);
        assert!(check(Some(&landmarks), Some(&config)).unwrap().valid);
    }
}
