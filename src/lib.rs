//! Kinematic frame hierarchy with relative pose queries.
//!
//! A [`FrameGraph`] maintains a tree of named reference frames, each placed by
//! a rigid transform relative to its parent. Frames are addressed by
//! `/`-separated paths and can be added, moved and removed at runtime; the
//! graph answers "what is the pose of frame A as seen from frame B" for any
//! two frames by composing local transforms through their lowest common
//! ancestor.
//!
//! The transform value type is nalgebra's `Isometry3<f64>`, exposed here as
//! [`Pose`].
//!
//! # Example
//!
//! ```rust
//! use framegraph::{FrameGraph, Pose};
//!
//! let mut graph = FrameGraph::new();
//! graph.add_frame("", "world", Pose::identity())?;
//! graph.add_frame("/world", "a", Pose::translation(1.0, 0.0, 0.0))?;
//! graph.add_frame("/world", "b", Pose::translation(0.0, 1.0, 0.0))?;
//!
//! // Pose of `a` expressed in `b`'s coordinates.
//! let pose = graph.pose("/world/a", "/world/b")?;
//! assert_eq!(pose.translation.vector.x, 1.0);
//! assert_eq!(pose.translation.vector.y, -1.0);
//! # Ok::<(), framegraph::FrameError>(())
//! ```
//!
//! Callers that query the same frame pair every tick can resolve the paths
//! once with [`FrameGraph::create_relative_pose`] and re-evaluate the returned
//! token via [`FrameGraph::pose_of`].
//!
//! The graph is single-threaded by design: every operation is a synchronous,
//! bounded tree walk and no internal locking is performed.

mod arena;
mod path;

pub mod display;
pub mod errors;
pub mod graph;
pub mod relative;

pub use display::ToTreeString;
pub use errors::{FrameError, FrameResult};
pub use graph::{FrameGraph, FrameRef};
pub use relative::RelativePose;

/// Rigid transform value type: position + orientation (SE3).
///
/// Supports composition (`*`), inversion (`.inverse()`) and identity
/// (`Pose::identity()`). Composed query results never alias a frame's stored
/// local pose.
pub type Pose = nalgebra::Isometry3<f64>;
