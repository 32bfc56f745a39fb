//! HTTP solver service for the Rubik's cube tutor.
//!
//! Exposes `POST /api/solve`, `POST /api/validate` and `GET /health`.

pub mod http_server;
pub mod scripted_solver;

pub use http_server::{api, start_server, with_cors, ServerConfig, DEFAULT_MAX_BODY_BYTES};
pub use scripted_solver::{ScriptedSolver, DEFAULT_SCRIPT};
