// error_handling.rs - Error types for state parsing, solving and configuration

use thiserror::Error;

use crate::cube_state::FaceColor;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Cube state must have 54 facelets, got {length}")]
    WrongLength { length: usize },

    #[error("Unknown color symbol {symbol:?} at facelet {index}")]
    UnknownSymbol { index: usize, symbol: char },

    #[error("Color {color} appears {count} times, expected 9")]
    ColorCount { color: FaceColor, count: usize },

    #[error("Face centers must all have different colors")]
    DuplicateCenters,
}

/// Failures surfaced by a solver. The tutor never retries on these.
#[derive(Error, Debug)]
pub enum SolverError {
    /// For network-backed `SolverService` impls outside this crate
    #[error("Solver transport failed: {0}")]
    Transport(String),

    #[error("Solver rejected the cube state: {0}")]
    Rejected(String),

    #[error("Malformed solver response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Could not read solution file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid timing value for {field}: {reason}")]
    InvalidTiming { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            StateError::WrongLength { length: 3 }.to_string(),
            "Cube state must have 54 facelets, got 3"
        );
        assert_eq!(
            StateError::ColorCount { color: FaceColor::Red, count: 10 }.to_string(),
            "Color R appears 10 times, expected 9"
        );
    }

    #[test]
    fn test_malformed_response_from_json() {
        let err: SolverError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SolverError::MalformedResponse(_)));
    }
}
