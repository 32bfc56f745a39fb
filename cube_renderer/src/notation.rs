// notation.rs - Singmaster move notation, descriptions and timeline labels

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cube_state::Face;
use crate::types::{Axis, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Single outer face turn: R L U D F B
    Face(Face),
    /// Outer face plus the adjacent middle slice: r l u d f b
    Wide(Face),
    /// Middle slice: M (follows L), E (follows D), S (follows F)
    Slice(Face),
    /// Whole-cube rotation: x (follows R), y (follows U), z (follows F)
    Cube(Face),
}

impl Layer {
    /// Face whose clockwise turn defines the direction of this layer
    pub fn reference_face(self) -> Face {
        match self {
            Layer::Face(f) | Layer::Wide(f) | Layer::Slice(f) | Layer::Cube(f) => f,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Double,
}

impl Turn {
    fn quarter_turns(self) -> f32 {
        match self {
            Turn::Clockwise => 1.0,
            Turn::CounterClockwise => -1.0,
            Turn::Double => 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("Empty move")]
    Empty,

    #[error("Unknown move {0:?}")]
    Unknown(String),
}

/// One parsed move such as `R`, `U'`, `M2` or `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub layer: Layer,
    pub turn: Turn,
}

impl Move {
    pub fn axis(&self) -> Axis {
        match self.layer.reference_face() {
            Face::Right | Face::Left => Axis::X,
            Face::Top | Face::Bottom => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// Signed rotation in radians, right-handed about the positive axis.
    /// A clockwise turn seen from outside a face is negative about that
    /// face's outward normal.
    pub fn rotation_amount(&self) -> f32 {
        let face = self.layer.reference_face();
        let outward = face.normal().iter().sum::<i8>() as f32;
        -outward * FRAC_PI_2 * self.turn.quarter_turns()
    }

    /// Face highlighted while the move plays
    pub fn highlight_face(&self) -> Face {
        self.layer.reference_face()
    }

    pub fn to_step(&self) -> Step {
        Step::new(self.to_string(), self.axis(), self.rotation_amount(), self.highlight_face())
    }

    /// Human readable description, e.g. "Rotate the Right face counter-clockwise"
    pub fn describe(&self) -> String {
        let turn = match self.turn {
            Turn::Clockwise => "clockwise",
            Turn::CounterClockwise => "counter-clockwise",
            Turn::Double => "twice",
        };
        let what = match self.layer {
            Layer::Face(face) => format!("the {} face", face_name(face)),
            Layer::Wide(face) => format!("the {} two layers", face_name(face)),
            Layer::Slice(Face::Left) => "the middle slice (like Left)".to_string(),
            Layer::Slice(Face::Bottom) => "the equator slice (like Bottom)".to_string(),
            Layer::Slice(face) => format!("the standing slice (like {})", face_name(face)),
            Layer::Cube(face) => format!("the whole cube (like {})", face_name(face)),
        };
        format!("Rotate {what} {turn}")
    }
}

fn face_name(face: Face) -> &'static str {
    match face {
        Face::Top => "Up",
        Face::Bottom => "Down",
        Face::Front => "Front",
        Face::Back => "Back",
        Face::Right => "Right",
        Face::Left => "Left",
    }
}

fn layer_symbol(layer: Layer) -> char {
    match layer {
        Layer::Face(face) => match face {
            Face::Top => 'U',
            Face::Bottom => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Right => 'R',
            Face::Left => 'L',
        },
        Layer::Wide(face) => layer_symbol(Layer::Face(face)).to_ascii_lowercase(),
        Layer::Slice(Face::Left) => 'M',
        Layer::Slice(Face::Bottom) => 'E',
        Layer::Slice(_) => 'S',
        Layer::Cube(Face::Right) => 'x',
        Layer::Cube(Face::Top) => 'y',
        Layer::Cube(_) => 'z',
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        let head = chars.next().ok_or(NotationError::Empty)?;

        let layer = match head {
            'U' => Layer::Face(Face::Top),
            'D' => Layer::Face(Face::Bottom),
            'F' => Layer::Face(Face::Front),
            'B' => Layer::Face(Face::Back),
            'R' => Layer::Face(Face::Right),
            'L' => Layer::Face(Face::Left),
            'u' => Layer::Wide(Face::Top),
            'd' => Layer::Wide(Face::Bottom),
            'f' => Layer::Wide(Face::Front),
            'b' => Layer::Wide(Face::Back),
            'r' => Layer::Wide(Face::Right),
            'l' => Layer::Wide(Face::Left),
            'M' => Layer::Slice(Face::Left),
            'E' => Layer::Slice(Face::Bottom),
            'S' => Layer::Slice(Face::Front),
            'x' => Layer::Cube(Face::Right),
            'y' => Layer::Cube(Face::Top),
            'z' => Layer::Cube(Face::Front),
            _ => return Err(NotationError::Unknown(token.to_string())),
        };

        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" | "2'" => Turn::Double,
            _ => return Err(NotationError::Unknown(token.to_string())),
        };

        Ok(Move { layer, turn })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.turn {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Double => "2",
        };
        write!(f, "{}{}", layer_symbol(self.layer), suffix)
    }
}

/// Parse a space separated algorithm such as `"R U R' U'"`
pub fn parse_algorithm(algorithm: &str) -> Result<Vec<Move>, NotationError> {
    algorithm.split_whitespace().map(str::parse).collect()
}

/// Description of a step's move, falling back to the raw notation
pub fn describe_step(step: &Step) -> String {
    match step.notation.parse::<Move>() {
        Ok(mv) => mv.describe(),
        Err(_) => format!("Perform {}", step.notation),
    }
}

/// Timeline labels: "1. R", "2. U", ...
pub fn timeline_labels(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step.notation))
        .collect()
}
