// lib.rs - Library exports for the Rubik's cube tutor
// Cube state model, facelet derivation, move animation and playback

pub mod animation;
pub mod config;
pub mod cube_state;
pub mod error_handling;
pub mod facelets;
pub mod frame_stats;
pub mod notation;
pub mod playback;
pub mod scene;
pub mod session;
pub mod solver;
pub mod types;

// Re-export commonly used types
pub use animation::{Completion, DualViewSynchronizer, StepAnimation, Vec3};
pub use config::TimingConfig;
pub use cube_state::{CubeState, Face, FaceColor, SOLVED_STATE};
pub use error_handling::{ConfigError, SolverError, StateError};
pub use facelets::{derive_cubelets, Cubelet, Facelet, PieceKind};
pub use playback::{Action, PlaybackSnapshot, PlaybackStatus, PlaybackStore, StoreEvent};
pub use scene::{CubeScene, FrameDriven, TutorialScene};
pub use session::TutorSession;
pub use solver::{FixtureSolver, SolverService};
pub use types::{Axis, SolveRequest, SolveResponse, Step, ValidationResponse};
