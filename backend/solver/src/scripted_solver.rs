// scripted_solver.rs - Deterministic stand-in for a real cube solver
//
// A solved cube needs no moves. Any other well-formed state gets the same
// short script (R then U) so the tutor always has something to play back.

use std::time::Instant;

use rubiks_cube_renderer::notation::{parse_algorithm, Move};
use rubiks_cube_renderer::{
    CubeState, SolveResponse, SolverError, SolverService, ValidationResponse,
};

/// Moves returned for every unsolved state
pub const DEFAULT_SCRIPT: &str = "R U";

#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    script: Vec<Move>,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self {
            script: parse_algorithm(DEFAULT_SCRIPT).unwrap_or_default(),
        }
    }

    /// Solver playing `algorithm` instead of the default script
    pub fn with_script(algorithm: &str) -> Result<Self, SolverError> {
        let script = parse_algorithm(algorithm).map_err(|e| SolverError::Rejected(e.to_string()))?;
        Ok(Self { script })
    }

    /// Strictly parse `raw` and solve it
    pub fn solve_raw(&self, raw: &str) -> Result<SolveResponse, SolverError> {
        let state = CubeState::parse(raw).map_err(|e| SolverError::Rejected(e.to_string()))?;
        Ok(self.solve_state(&state))
    }

    pub fn solve_state(&self, state: &CubeState) -> SolveResponse {
        let started = Instant::now();
        let steps = if state.is_solved() {
            Vec::new()
        } else {
            self.script.iter().map(Move::to_step).collect()
        };
        log::debug!("Scripted {} step(s) for {state}", steps.len());

        SolveResponse {
            steps,
            solve_time: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Plausibility check for `/api/validate`
    pub fn validate(&self, raw: &str) -> ValidationResponse {
        match CubeState::parse(raw).and_then(|state| state.validate()) {
            Ok(()) => ValidationResponse {
                valid: true,
                error: None,
            },
            Err(e) => ValidationResponse {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for ScriptedSolver {
    async fn solve(&self, state: &CubeState) -> Result<SolveResponse, SolverError> {
        Ok(self.solve_state(state))
    }
}
