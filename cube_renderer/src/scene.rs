// scene.rs - Tutorial scene capability and the in-memory cube scene
//
// Scene objects are shared single-threaded handles. Animators hold only weak
// references, so disposing an object ends its animations as no-ops.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::{Completion, HighlightAnimator, RotationAnimator, Vec3};
use crate::cube_state::Face;
use crate::types::Axis;

/// Emissive intensity of a face material at rest
pub const DEFAULT_EMISSIVE_INTENSITY: f32 = 1.5;

// ============================================================================
// SCENE HANDLES
// ============================================================================

/// Rotatable scene node (the tutorial cube group)
#[derive(Debug, Default)]
pub struct SceneObject {
    rotation: Cell<Vec3>,
}

impl SceneObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation.get()
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.rotation.set(rotation);
    }

    pub fn set_rotation_component(&self, axis: Axis, angle: f32) {
        self.rotation.set(self.rotation.get().with_component(axis, angle));
    }
}

/// Emissive material of one face mesh
#[derive(Debug)]
pub struct FaceMaterial {
    emissive_intensity: Cell<f32>,
}

impl FaceMaterial {
    pub fn new() -> Self {
        Self::with_intensity(DEFAULT_EMISSIVE_INTENSITY)
    }

    pub fn with_intensity(intensity: f32) -> Self {
        Self {
            emissive_intensity: Cell::new(intensity),
        }
    }

    pub fn emissive_intensity(&self) -> f32 {
        self.emissive_intensity.get()
    }

    pub fn set_emissive_intensity(&self, intensity: f32) {
        self.emissive_intensity.set(intensity);
    }
}

impl Default for FaceMaterial {
    fn default() -> Self {
        Self::new()
    }
}

/// Face mesh slot. Either the mesh or its material may be missing.
#[derive(Debug, Default)]
pub struct FaceMesh {
    material: Option<Rc<FaceMaterial>>,
}

impl FaceMesh {
    pub fn with_material(material: Rc<FaceMaterial>) -> Self {
        Self {
            material: Some(material),
        }
    }

    pub fn material(&self) -> Option<&Rc<FaceMaterial>> {
        self.material.as_ref()
    }
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// What the synchronizer needs from the tutorial view
pub trait TutorialScene {
    /// Rotate the whole cube group by `angle` radians about `axis`
    fn rotate(&mut self, axis: Axis, angle: f32, duration: Duration) -> Completion;

    /// Pulse the emissive intensity of face `face_index`
    fn highlight(&mut self, face_index: usize, duration: Duration) -> Completion;
}

/// Scenes whose animations are sampled by an external frame clock
pub trait FrameDriven {
    fn advance(&mut self, dt: Duration);

    fn is_animating(&self) -> bool;

    /// Bring the scene back to rest, ending running animations
    fn settle(&mut self) {}
}

// ============================================================================
// CUBE SCENE
// ============================================================================

/// Tutorial cube: one rotatable group and six face meshes in `Face` order
pub struct CubeScene {
    group: Option<Rc<SceneObject>>,
    faces: Vec<Option<FaceMesh>>,
    rotations: RotationAnimator,
    highlights: HighlightAnimator,
}

impl CubeScene {
    pub fn new() -> Self {
        Self {
            group: Some(Rc::new(SceneObject::new())),
            faces: Face::ALL
                .iter()
                .map(|_| Some(FaceMesh::with_material(Rc::new(FaceMaterial::new()))))
                .collect(),
            rotations: RotationAnimator::new(),
            highlights: HighlightAnimator::new(),
        }
    }

    pub fn group(&self) -> Option<&Rc<SceneObject>> {
        self.group.as_ref()
    }

    pub fn face_material(&self, face: Face) -> Option<&Rc<FaceMaterial>> {
        self.faces
            .get(face.index())
            .and_then(Option::as_ref)
            .and_then(FaceMesh::material)
    }

    /// Drop the cube group; running rotations resolve on their next frame
    pub fn dispose_group(&mut self) {
        self.group = None;
    }

    /// Drop one face mesh and its material
    pub fn dispose_face(&mut self, face: Face) {
        if let Some(slot) = self.faces.get_mut(face.index()) {
            *slot = None;
        }
    }

    /// Put the cube back to rest: no rotation, no pulses
    pub fn reset_pose(&mut self) {
        self.rotations.finish_all();
        self.highlights.cancel_all();
        if let Some(group) = &self.group {
            group.set_rotation(Vec3::zero());
        }
    }
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorialScene for CubeScene {
    fn rotate(&mut self, axis: Axis, angle: f32, duration: Duration) -> Completion {
        self.rotations.animate(self.group.as_ref(), axis, angle, duration)
    }

    fn highlight(&mut self, face_index: usize, duration: Duration) -> Completion {
        let material = self
            .faces
            .get(face_index)
            .and_then(Option::as_ref)
            .and_then(FaceMesh::material);
        self.highlights.animate(material, duration)
    }
}

impl FrameDriven for CubeScene {
    fn advance(&mut self, dt: Duration) {
        self.rotations.advance(dt);
        self.highlights.advance(dt);
    }

    fn is_animating(&self) -> bool {
        self.rotations.active_count() + self.highlights.active_count() > 0
    }

    fn settle(&mut self) {
        self.reset_pose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_and_highlight() {
        let mut scene = CubeScene::new();
        let mut rotation = scene.rotate(Axis::Y, -FRAC_PI_2, Duration::from_millis(600));
        let mut highlight = scene.highlight(Face::Top.index(), Duration::from_millis(500));
        assert!(scene.is_animating());

        scene.advance(Duration::from_millis(500));
        assert!(highlight.is_resolved());
        assert!(!rotation.is_resolved());

        scene.advance(Duration::from_millis(100));
        assert!(rotation.is_resolved());
        assert!(!scene.is_animating());
        assert_eq!(scene.group().unwrap().rotation().y, -FRAC_PI_2);
    }

    #[test]
    fn test_missing_targets_resolve_immediately() {
        let mut scene = CubeScene::new();
        scene.dispose_group();
        scene.dispose_face(Face::Left);

        assert!(scene.rotate(Axis::X, 1.0, Duration::from_millis(600)).is_resolved());
        assert!(scene.highlight(Face::Left.index(), Duration::from_millis(500)).is_resolved());
        assert!(scene.highlight(17, Duration::from_millis(500)).is_resolved());
        assert!(!scene.is_animating());
    }

    #[test]
    fn test_dispose_mid_flight() {
        let mut scene = CubeScene::new();
        let mut rotation = scene.rotate(Axis::Z, 1.0, Duration::from_millis(600));
        scene.advance(Duration::from_millis(100));
        scene.dispose_group();
        scene.advance(Duration::from_millis(16));
        assert!(rotation.is_resolved());
    }

    #[test]
    fn test_reset_pose() {
        let mut scene = CubeScene::new();
        let _ = scene.rotate(Axis::X, 1.0, Duration::from_millis(600));
        let _ = scene.highlight(0, Duration::from_millis(500));
        scene.advance(Duration::from_millis(200));
        scene.reset_pose();

        assert_eq!(scene.group().unwrap().rotation(), Vec3::zero());
        assert_eq!(
            scene.face_material(Face::Top).unwrap().emissive_intensity(),
            DEFAULT_EMISSIVE_INTENSITY
        );
        assert!(!scene.is_animating());
    }
}
