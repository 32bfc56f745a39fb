// cube_state.rs - 54-facelet cube state, face order and color alphabet
//
// Layout: six runs of nine symbols in the fixed face order
//   Top, Bottom, Front, Back, Right, Left
// Each run is read from outside the cube, row-major:
//   0 1 2
//   3 4 5
//   6 7 8

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::animation::Color;
use crate::error_handling::StateError;

/// Number of facelets on a 3x3x3 cube.
pub const FACELET_COUNT: usize = 54;

/// Number of facelets on a single face.
pub const FACE_SIZE: usize = 9;

/// The solved configuration. Solvedness is nothing more than this value.
pub const SOLVED_STATE: &str = "WWWWWWWWWYYYYYYYYYBBBBBBBBBGGGGGGGGGRRRRRRRRROOOOOOOOO";

/// Sticker color alphabet, in pointer-cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceColor {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "O")]
    Orange,
}

impl FaceColor {
    pub const ALL: [FaceColor; 6] = [
        FaceColor::White,
        FaceColor::Yellow,
        FaceColor::Blue,
        FaceColor::Green,
        FaceColor::Red,
        FaceColor::Orange,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'W' => Some(FaceColor::White),
            'Y' => Some(FaceColor::Yellow),
            'B' => Some(FaceColor::Blue),
            'G' => Some(FaceColor::Green),
            'R' => Some(FaceColor::Red),
            'O' => Some(FaceColor::Orange),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            FaceColor::White => 'W',
            FaceColor::Yellow => 'Y',
            FaceColor::Blue => 'B',
            FaceColor::Green => 'G',
            FaceColor::Red => 'R',
            FaceColor::Orange => 'O',
        }
    }

    /// Next color in the alphabet, wrapping from Orange back to White.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Display color of the sticker material.
    pub fn rgb(self) -> Color {
        match self {
            FaceColor::White => Color::from_hex(0xFFFFFF),
            FaceColor::Yellow => Color::from_hex(0xFFFF00),
            FaceColor::Blue => Color::from_hex(0x0000FF),
            FaceColor::Green => Color::from_hex(0x00DD00),
            FaceColor::Red => Color::from_hex(0xFF0000),
            FaceColor::Orange => Color::from_hex(0xFFA500),
        }
    }
}

impl fmt::Display for FaceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Cube faces in canonical state order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Top,
    Bottom,
    Front,
    Back,
    Right,
    Left,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
    ];

    /// Position of this face's run inside the state string.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Color of this face when solved, also the fail-soft substitute.
    pub fn home_color(self) -> FaceColor {
        match self {
            Face::Top => FaceColor::White,
            Face::Bottom => FaceColor::Yellow,
            Face::Front => FaceColor::Blue,
            Face::Back => FaceColor::Green,
            Face::Right => FaceColor::Red,
            Face::Left => FaceColor::Orange,
        }
    }

    /// Outward normal in grid coordinates (x right, y up, z front).
    pub fn normal(self) -> [i8; 3] {
        match self {
            Face::Top => [0, 1, 0],
            Face::Bottom => [0, -1, 0],
            Face::Front => [0, 0, 1],
            Face::Back => [0, 0, -1],
            Face::Right => [1, 0, 0],
            Face::Left => [-1, 0, 0],
        }
    }

    /// Index of the facelet seen at grid position `[x, y, z]` within this
    /// face's 3x3 run, read from outside the cube.
    ///
    /// The caller guarantees the position lies on this face.
    pub fn facelet_offset(self, [x, y, z]: [i8; 3]) -> usize {
        let (row, col) = match self {
            Face::Top => (z + 1, x + 1),
            Face::Bottom => (1 - z, x + 1),
            Face::Front => (1 - y, x + 1),
            Face::Back => (1 - y, 1 - x),
            Face::Right => (1 - y, 1 - z),
            Face::Left => (1 - y, z + 1),
        };
        row as usize * 3 + col as usize
    }

    /// Absolute index into the 54-symbol state.
    pub fn state_index(self, position: [i8; 3]) -> usize {
        self.index() * FACE_SIZE + self.facelet_offset(position)
    }
}

/// A complete, well-formed 54-symbol color assignment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    facelets: [FaceColor; FACELET_COUNT],
}

impl CubeState {
    pub fn solved() -> Self {
        let mut facelets = [FaceColor::White; FACELET_COUNT];
        for face in Face::ALL {
            let start = face.index() * FACE_SIZE;
            facelets[start..start + FACE_SIZE].fill(face.home_color());
        }
        Self { facelets }
    }

    /// Strict parse: exactly 54 symbols from the color alphabet.
    pub fn parse(input: &str) -> Result<Self, StateError> {
        let length = input.chars().count();
        if length != FACELET_COUNT {
            return Err(StateError::WrongLength { length });
        }

        let mut facelets = [FaceColor::White; FACELET_COUNT];
        for (index, symbol) in input.chars().enumerate() {
            facelets[index] =
                FaceColor::from_symbol(symbol).ok_or(StateError::UnknownSymbol { index, symbol })?;
        }
        Ok(Self { facelets })
    }

    /// Lenient parse: every missing or unknown symbol is replaced by the
    /// home color of the face it belongs to. Never fails.
    pub fn from_str_lossy(input: &str) -> Self {
        let mut symbols = input.chars();
        let mut facelets = [FaceColor::White; FACELET_COUNT];
        let mut substituted = 0usize;

        for (index, slot) in facelets.iter_mut().enumerate() {
            let home = Face::ALL[index / FACE_SIZE].home_color();
            *slot = match symbols.next().and_then(FaceColor::from_symbol) {
                Some(color) => color,
                None => {
                    substituted += 1;
                    home
                }
            };
        }

        if substituted > 0 || symbols.next().is_some() {
            log::warn!(
                "Malformed cube state ({} chars), substituted {} facelet(s)",
                input.chars().count(),
                substituted
            );
        }
        Self { facelets }
    }

    pub fn color(&self, index: usize) -> Option<FaceColor> {
        self.facelets.get(index).copied()
    }

    pub fn facelets(&self) -> &[FaceColor; FACELET_COUNT] {
        &self.facelets
    }

    pub fn face(&self, face: Face) -> &[FaceColor] {
        let start = face.index() * FACE_SIZE;
        &self.facelets[start..start + FACE_SIZE]
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::solved()
    }

    /// Copy of this state with one facelet advanced to the next color.
    /// Indices outside the state leave it unchanged.
    pub fn with_cycled_facelet(&self, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(color) = next.facelets.get_mut(index) {
            *color = color.next();
        }
        next
    }

    /// Physical plausibility check: nine of each color and six distinct
    /// centers. Does not check solvability.
    pub fn validate(&self) -> Result<(), StateError> {
        for color in FaceColor::ALL {
            let count = self.facelets.iter().filter(|&&c| c == color).count();
            if count != FACE_SIZE {
                return Err(StateError::ColorCount { color, count });
            }
        }

        let mut centers: Vec<FaceColor> = Face::ALL.iter().map(|&face| self.face(face)[4]).collect();
        centers.sort();
        centers.dedup();
        if centers.len() != Face::ALL.len() {
            return Err(StateError::DuplicateCenters);
        }
        Ok(())
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in &self.facelets {
            write!(f, "{}", color.symbol())?;
        }
        Ok(())
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CubeState({self})")
    }
}

impl FromStr for CubeState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CubeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CubeState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
