//! Run command implementation
//!
//! Drives a rig session over an in-memory scene built from mesh files and
//! prints one status line per operation.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use autorig_pipeline::{Operation, RigSession, StepReport};
use autorig_scene::{MemoryScene, SceneAdapter};
use autorig_spec::{RigPhase, Skeleton, StageStatus};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::input::{load_config_or_default, load_landmark_overrides, load_mesh};

/// Inputs of the run command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Operations to invoke, in order. Empty means all six stages.
    pub steps: Vec<Operation>,
    pub config: Option<PathBuf>,
    /// Landmark positions applied right after markers are created.
    pub landmarks: Option<PathBuf>,
    pub meshes: Vec<PathBuf>,
    /// Mesh to bind, instead of the selection or first mesh.
    pub mesh: Option<String>,
    /// Nodes selected in the scene before the run.
    pub select: Vec<String>,
    /// Continue after a failed operation.
    pub keep_going: bool,
}

/// Default operation sequence: every stage, no reset.
pub const DEFAULT_STEPS: [Operation; 6] = [
    Operation::CreateLandmarks,
    Operation::Validate,
    Operation::CreateArmature,
    Operation::AdjustBones,
    Operation::WeightPaint,
    Operation::TestDeformation,
];

/// Binding details for reports.
#[derive(Debug, Serialize)]
pub struct BindingSummary<'a> {
    pub mesh: &'a str,
    pub armature: &'a str,
    pub vertex_count: usize,
    pub influencing_bones: BTreeSet<&'a str>,
}

/// Machine-readable run output.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    pub success: bool,
    pub phase: RigPhase,
    pub steps: &'a [StepReport],
    pub status: Vec<StageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<&'a Skeleton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingSummary<'a>>,
}

/// Outcome of a run, before it is printed.
pub struct RunResult {
    pub session: RigSession<MemoryScene>,
    pub reports: Vec<StepReport>,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.reports.iter().all(|report| report.success)
    }

    pub fn output(&self) -> RunOutput<'_> {
        RunOutput {
            success: self.success(),
            phase: self.session.phase(),
            steps: &self.reports,
            status: self.session.completion_status(),
            skeleton: self.session.skeleton(),
            binding: self.session.binding().map(|binding| BindingSummary {
                mesh: &binding.mesh,
                armature: &binding.armature,
                vertex_count: binding.weights.vertex_count(),
                influencing_bones: binding.weights.influencing_bones(),
            }),
        }
    }
}

/// Run the rig command
///
/// # Returns
/// Exit code: 0 if every operation succeeded, 1 otherwise
pub fn run(options: &RunOptions, json_output: bool) -> Result<ExitCode> {
    let result = execute(options)?;

    if json_output {
        let json = serde_json::to_string_pretty(&result.output())
            .context("Failed to serialize run output")?;
        println!("{}", json);
    } else {
        print_human(&result);
    }

    Ok(if result.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Loads inputs and invokes the requested operations.
pub fn execute(options: &RunOptions) -> Result<RunResult> {
    let config = load_config_or_default(options.config.as_deref())?;
    let overrides = options
        .landmarks
        .as_deref()
        .map(load_landmark_overrides)
        .transpose()?;

    let mut scene = MemoryScene::new();
    for path in &options.meshes {
        let mesh = load_mesh(path)?;
        let name = mesh.name.clone();
        scene
            .create_node(mesh.into_node())
            .with_context(|| format!("Failed to add mesh '{}' from {}", name, path.display()))?;
    }
    for name in &options.select {
        scene
            .select(name)
            .with_context(|| format!("Cannot select '{}'", name))?;
    }

    let mut session = RigSession::new(scene, config).context("Invalid rig configuration")?;
    let steps: &[Operation] = if options.steps.is_empty() {
        &DEFAULT_STEPS
    } else {
        &options.steps
    };

    let mut reports = Vec::with_capacity(steps.len());
    for op in steps {
        let report = session.invoke(*op, options.mesh.as_deref());
        let success = report.success;
        reports.push(report);

        if success && *op == Operation::CreateLandmarks {
            if let Some(overrides) = &overrides {
                for (name, position) in overrides {
                    session
                        .move_landmark(*name, *position)
                        .with_context(|| format!("Failed to move landmark '{}'", name))?;
                }
                debug!(count = overrides.len(), "applied landmark overrides");
            }
        }
        if !success && !options.keep_going {
            break;
        }
    }

    Ok(RunResult { session, reports })
}

fn print_human(result: &RunResult) {
    let armature = &result.session.config().armature_name;
    println!("{} {}", "Rigging:".cyan().bold(), armature);

    for report in &result.reports {
        if report.success {
            println!(
                "  {} {} {}",
                "OK".green(),
                report.operation.as_str().bold(),
                report.message
            );
        } else {
            let code = report.code.unwrap_or("");
            println!(
                "  {} {} {} {}",
                "x".red(),
                report.operation.as_str().bold(),
                format!("[{}]", code).dimmed(),
                report.message
            );
        }
    }

    println!("\n{}", "Progress:".cyan().bold());
    for row in result.session.completion_status() {
        let mark = if row.completed {
            "[x]".green()
        } else {
            "[ ]".dimmed()
        };
        println!("  {} {}", mark, row.label);
    }

    if let Some(skeleton) = result.session.skeleton() {
        println!(
            "\n{} {} bones, {} IK chains",
            "Skeleton:".dimmed(),
            skeleton.bone_count(),
            skeleton.ik_chains().len()
        );
    }
    if let Some(binding) = result.session.binding() {
        println!(
            "{} {} ({} vertices, {} bones)",
            "Binding:".dimmed(),
            binding.mesh,
            binding.weights.vertex_count(),
            binding.weights.influencing_bones().len()
        );
    }

    let summary = if result.success() {
        "SUCCESS".green().bold()
    } else {
        "FAILED".red().bold()
    };
    println!("\n{} {}", summary, phase_label(result.session.phase()));
}

fn phase_label(phase: RigPhase) -> &'static str {
    match phase {
        RigPhase::Empty => "nothing rigged",
        RigPhase::LandmarksCreated => "reference points placed",
        RigPhase::Validated => "reference points validated",
        RigPhase::ArmatureBuilt => "armature built",
        RigPhase::BonesAdjusted => "bones adjusted",
        RigPhase::WeightPainted => "mesh bound",
        RigPhase::DeformationTested => "deformation tested",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn mesh_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(format!("{}.json", name));
        let json = format!(
            r#"{{"name": "{}", "vertices": [[0.0, 0.05, 1.1], [-0.6, 0.0, 1.1], [0.15, 0.0, 0.3]]}}"#,
            name
        );
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_full_run_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let options = RunOptions {
            meshes: vec![mesh_file(&tmp, "Body")],
            ..Default::default()
        };
        let result = execute(&options).unwrap();
        assert!(result.success());
        assert_eq!(result.reports.len(), 6);
        assert_eq!(result.session.phase(), RigPhase::DeformationTested);

        let output = serde_json::to_value(result.output()).unwrap();
        assert_eq!(output["binding"]["mesh"], "Body");
        assert_eq!(output["binding"]["vertex_count"], 3);
        assert_eq!(output["status"][5]["completed"], true);
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let options = RunOptions::default();
        let result = execute(&options).unwrap();
        assert!(!result.success());
        assert_eq!(result.reports.len(), 5);
        let last = result.reports.last().unwrap();
        assert_eq!(last.operation, Operation::WeightPaint);
        assert_eq!(last.code, Some("RIG_003"));
    }

    #[test]
    fn test_keep_going_reports_every_step() {
        let options = RunOptions {
            keep_going: true,
            ..Default::default()
        };
        let result = execute(&options).unwrap();
        assert_eq!(result.reports.len(), 6);
        assert_eq!(
            result.reports[5].message,
            "Please complete weight painting first."
        );
    }

    #[test]
    fn test_landmark_overrides_apply_after_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let landmarks = tmp.path().join("landmarks.json");
        fs::write(&landmarks, r#"{"head": [0.0, 0.0, 1.0]}"#).unwrap();

        let options = RunOptions {
            landmarks: Some(landmarks),
            ..Default::default()
        };
        let result = execute(&options).unwrap();
        assert_eq!(result.reports.len(), 2);
        assert_eq!(
            result.reports[1].message,
            "Validation failed: Head should be above neck"
        );
    }

    #[test]
    fn test_explicit_mesh_and_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let meshes = vec![mesh_file(&tmp, "Body"), mesh_file(&tmp, "Hat")];

        let options = RunOptions {
            meshes: meshes.clone(),
            select: vec!["Hat".to_string()],
            ..Default::default()
        };
        let result = execute(&options).unwrap();
        assert_eq!(result.session.binding().unwrap().mesh, "Hat");

        let options = RunOptions {
            meshes,
            select: vec!["Hat".to_string()],
            mesh: Some("Body".to_string()),
            ..Default::default()
        };
        let result = execute(&options).unwrap();
        assert_eq!(result.session.binding().unwrap().mesh, "Body");
    }

    #[test]
    fn test_input_errors_abort_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        let body = mesh_file(&tmp, "Body");
        let options = RunOptions {
            meshes: vec![body.clone(), body],
            ..Default::default()
        };
        let err = execute(&options).err().unwrap();
        assert!(err.to_string().contains("Failed to add mesh 'Body'"));

        let options = RunOptions {
            select: vec!["Ghost".to_string()],
            ..Default::default()
        };
        assert!(execute(&options).is_err());
    }
}
