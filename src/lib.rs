//! Client-side model of a 3D maze generation/solving tool.
//!
//! The crate turns mazes into compact run-length byte streams and back
//! ([`codec`]), dispatches generate/solve work onto a bounded worker pool
//! ([`pool`], [`model`]), and negotiates one-shot solve exchanges with a
//! remote peer over TCP ([`remote`]). Every outcome, success or failure,
//! surfaces as exactly one notification on the publish/subscribe bus
//! ([`bus`]) consumed by the presentation layer.

pub mod bus;
pub mod codec;
pub mod config;
pub mod error;
pub mod generate;
pub mod maze;
pub mod model;
pub mod pool;
pub mod remote;
pub mod solve;
pub mod store;

pub use bus::{ErrorKind, Notification, NotificationBus};
pub use config::{load_properties, Properties};
pub use error::{DaedalusError, Result};
pub use generate::{GrowingTreeGenerator, MazeGenerator};
pub use maze::{Axis, Maze3d, Position};
pub use model::{MazeModel, SolveMode};
pub use pool::WorkerPool;
pub use remote::SolveClient;
pub use solve::{BfsSolver, MazeSolver, Solution};
pub use store::MazeStore;
