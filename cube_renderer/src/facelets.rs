// facelets.rs - Cube state to per-cubelet facelet assignments
//
// The 26 visible cubelets are enumerated x-major, then y, then z over
// [-1, 0, 1]^3 with the core skipped. Each cubelet lists the facelets it
// shows in canonical face order (Top, Bottom, Front, Back, Right, Left).

use std::rc::Rc;

use serde::Serialize;

use crate::animation::Vec3;
use crate::cube_state::{CubeState, Face, FaceColor};

/// World distance between neighbouring cubelet centers
pub const CUBELET_SPACING: f32 = 1.2;

/// Number of visible cubelets
pub const CUBELET_COUNT: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Center,
    Edge,
    Corner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Facelet {
    pub face: Face,
    /// Index into the 54-symbol state
    pub state_index: usize,
    pub color: FaceColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cubelet {
    pub grid: [i8; 3],
    pub position: Vec3,
    pub facelets: Vec<Facelet>,
    pub is_center: bool,
}

impl Cubelet {
    pub fn kind(&self) -> PieceKind {
        match self.facelets.len() {
            1 => PieceKind::Center,
            2 => PieceKind::Edge,
            _ => PieceKind::Corner,
        }
    }

    /// Sticker color shown on `face`, if this cubelet lies on it
    pub fn color_on(&self, face: Face) -> Option<FaceColor> {
        self.facelets.iter().find(|f| f.face == face).map(|f| f.color)
    }
}

/// Derive the cubelets for a raw state string.
///
/// Fail-soft: a wrong length or unknown symbols fall back to the home color
/// of the affected face, so this never fails.
pub fn derive_cubelets(state: &str) -> Vec<Cubelet> {
    cubelets_for(&CubeState::from_str_lossy(state))
}

/// Derive the cubelets for an already parsed state
pub fn cubelets_for(state: &CubeState) -> Vec<Cubelet> {
    let mut cubelets = Vec::with_capacity(CUBELET_COUNT);

    for x in -1i8..=1 {
        for y in -1i8..=1 {
            for z in -1i8..=1 {
                if x == 0 && y == 0 && z == 0 {
                    continue;
                }
                let grid = [x, y, z];

                let facelets = Face::ALL
                    .iter()
                    .filter(|face| on_face(**face, grid))
                    .map(|&face| {
                        let state_index = face.state_index(grid);
                        Facelet {
                            face,
                            state_index,
                            color: state.facelets()[state_index],
                        }
                    })
                    .collect();

                let manhattan: i8 = grid.iter().map(|c| c.abs()).sum();
                cubelets.push(Cubelet {
                    grid,
                    position: Vec3::from(grid.map(f32::from)) * CUBELET_SPACING,
                    facelets,
                    is_center: manhattan == 1,
                });
            }
        }
    }

    cubelets
}

fn on_face(face: Face, grid: [i8; 3]) -> bool {
    let normal = face.normal();
    (0..3).any(|axis| normal[axis] != 0 && grid[axis] == normal[axis])
}

/// Resolve a pointer hit on `(cubelet, slot)` to a state index.
/// Returns None for a miss outside the cubelet list or its facelets.
pub fn pick_facelet(cubelets: &[Cubelet], cubelet: usize, slot: usize) -> Option<usize> {
    cubelets
        .get(cubelet)
        .and_then(|c| c.facelets.get(slot))
        .map(|f| f.state_index)
}

/// Memoized derivation keyed on state equality
#[derive(Debug)]
pub struct CubeletCache {
    key: Option<CubeState>,
    cubelets: Rc<[Cubelet]>,
}

impl CubeletCache {
    pub fn new() -> Self {
        Self {
            key: None,
            cubelets: Rc::from(Vec::new()),
        }
    }

    /// Cubelets for `state`, recomputed only when the state changed
    pub fn get(&mut self, state: &CubeState) -> Rc<[Cubelet]> {
        if self.key.as_ref() != Some(state) {
            log::debug!("Recomputing cubelets for {state}");
            self.cubelets = cubelets_for(state).into();
            self.key = Some(state.clone());
        }
        Rc::clone(&self.cubelets)
    }
}

impl Default for CubeletCache {
    fn default() -> Self {
        Self::new()
    }
}
