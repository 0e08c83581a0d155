//! AutoRig Pipeline
//!
//! This crate runs the step-gated humanoid rig pipeline against a host scene.
//!
//! # Overview
//!
//! - [`RigSession`] - owns the scene and the rig in progress, exposes one
//!   method per stage, and enforces stage order
//! - [`Operation`] / [`StepReport`] - name-addressable operations and their
//!   user-facing outcome, for UI drivers
//! - [`RigError`] - coded errors for rejected or failed stages
//!
//! # Example
//!
//! ```
//! use autorig_pipeline::{Operation, RigSession};
//! use autorig_scene::{MemoryScene, SceneAdapter, SceneNode};
//!
//! let mut scene = MemoryScene::new();
//! scene
//!     .create_node(SceneNode::mesh("Body", vec![[0.0, 0.0, 1.0]]))
//!     .unwrap();
//!
//! let mut session = RigSession::with_defaults(scene);
//! for op in &Operation::ALL[..6] {
//!     let report = session.invoke(*op, None);
//!     assert!(report.success, "{}", report.message);
//! }
//! assert!(session.state().is_finished());
//! ```

pub mod error;
pub mod operation;
pub mod session;

pub use error::{RigError, RigResult, NO_MESH_MESSAGE};
pub use operation::{Operation, StepReport, UnknownOperation};
pub use session::RigSession;
