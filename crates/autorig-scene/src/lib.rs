//! AutoRig Scene
//!
//! This crate is the seam between the rig pipeline and the host 3D
//! application. It defines the capabilities the pipeline needs from a host and
//! ships an in-memory host used by tests and the CLI.
//!
//! # Overview
//!
//! - [`SceneAdapter`] - named-object store: create, remove, find by name or kind,
//!   selection, location, and parenting
//! - [`AutoWeighting`] - the host's automatic vertex-weighting algorithm
//! - [`MemoryScene`] - a complete in-process implementation of both
//!
//! # Example
//!
//! ```
//! use autorig_scene::{MemoryScene, NodeKind, SceneAdapter, SceneNode};
//!
//! let mut scene = MemoryScene::new();
//! scene.create_node(SceneNode::mesh("Body", vec![[0.0, 0.0, 1.0]])).unwrap();
//! assert_eq!(scene.find_nodes_by_kind(NodeKind::Mesh).len(), 1);
//! ```

pub mod adapter;
pub mod error;
pub mod memory;
pub mod node;
pub mod weighting;

pub use adapter::{AutoWeighting, SceneAdapter};
pub use error::{SceneError, SceneResult};
pub use memory::MemoryScene;
pub use node::{NodeData, NodeKind, SceneNode};
