// types.rs - Shared type definitions for solution steps and solver payloads
use serde::{Deserialize, Serialize};

use crate::cube_state::Face;

/// Rotation axis of a step, serialized as `"x"`, `"y"` or `"z"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One solution move as delivered by the solver. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "move")]
    pub notation: String,
    #[serde(rename = "rotationAxis")]
    pub rotation_axis: Axis,
    /// Signed angle in radians
    #[serde(rename = "rotationAmount")]
    pub rotation_amount: f32,
    /// Face to highlight, in `Face` order
    #[serde(rename = "faceIndex")]
    pub face_index: usize,
}

impl Step {
    pub fn new(notation: impl Into<String>, axis: Axis, amount: f32, face: Face) -> Self {
        Self {
            notation: notation.into(),
            rotation_axis: axis,
            rotation_amount: amount,
            face_index: face.index(),
        }
    }

    pub fn face(&self) -> Option<Face> {
        Face::from_index(self.face_index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(rename = "cubeState")]
    pub cube_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub steps: Vec<Step>,
    /// Milliseconds spent by the solver
    #[serde(rename = "solveTime")]
    pub solve_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wire_format() {
        let json = r#"{"move":"R'","rotationAxis":"x","rotationAmount":1.5707964,"faceIndex":4}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.notation, "R'");
        assert_eq!(step.rotation_axis, Axis::X);
        assert_eq!(step.face(), Some(Face::Right));

        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["rotationAxis"], "x");
        assert_eq!(value["move"], "R'");
    }

    #[test]
    fn test_validation_response_omits_empty_error() {
        let ok = ValidationResponse { valid: true, error: None };
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"valid":true}"#);
    }
}
