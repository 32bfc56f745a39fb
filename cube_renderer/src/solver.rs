// solver.rs - Solver service contract and a file-backed implementation
//
// The tutor treats solving as a black box: a cube state goes in, an ordered
// list of steps comes out. Failures are handed back unchanged; nothing here
// retries.

use std::path::PathBuf;

use crate::cube_state::CubeState;
use crate::error_handling::SolverError;
use crate::types::SolveResponse;

#[allow(async_fn_in_trait)]
pub trait SolverService {
    async fn solve(&self, state: &CubeState) -> Result<SolveResponse, SolverError>;
}

/// Serves a pre-computed solution stored as `SolveResponse` JSON
#[derive(Debug, Clone)]
pub struct FixtureSolver {
    path: PathBuf,
}

impl FixtureSolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SolverService for FixtureSolver {
    async fn solve(&self, state: &CubeState) -> Result<SolveResponse, SolverError> {
        log::debug!("Reading solution for {state} from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let response: SolveResponse = serde_json::from_str(&raw)?;
        Ok(response)
    }
}
