// animation/camera_sync.rs - Input/tutorial camera mirroring
//
// The tutorial view never owns its camera: every frame it copies whatever the
// user did to the input view's camera, so both cubes are seen from the same
// angle.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use super::Vec3;

/// Default camera position looking at the cube center
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

/// Default vertical field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;

/// Snapshot of a camera pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub fov: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            rotation: Vec3::zero(),
            fov: DEFAULT_FOV_DEGREES,
        }
    }
}

/// Camera state using Cell for interior mutability (single-threaded access)
#[derive(Debug, Default)]
pub struct CameraRig {
    position: Cell<Vec3>,
    rotation: Cell<Vec3>,
    fov: Cell<f32>,
}

impl CameraRig {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            position: Cell::new(pose.position),
            rotation: Cell::new(pose.rotation),
            fov: Cell::new(pose.fov),
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position.get(),
            rotation: self.rotation.get(),
            fov: self.fov.get(),
        }
    }

    pub fn set_pose(&self, pose: CameraPose) {
        self.position.set(pose.position);
        self.rotation.set(pose.rotation);
        self.fov.set(pose.fov);
    }

    /// Orbit around the world Y axis, keeping distance and height
    pub fn orbit(&self, yaw: f32) {
        let position = self.position.get();
        let (sin, cos) = yaw.sin_cos();
        self.position.set(Vec3::new(
            position.x * cos + position.z * sin,
            position.y,
            position.z * cos - position.x * sin,
        ));

        let rotation = self.rotation.get();
        self.rotation.set(Vec3::new(rotation.x, rotation.y + yaw, rotation.z));
    }

    pub fn set_fov(&self, fov: f32) {
        self.fov.set(fov);
    }
}

/// The pair of cameras for the two views
#[derive(Debug)]
pub struct DualViewCameras {
    input: CameraRig,
    tutorial: CameraRig,
}

impl DualViewCameras {
    pub fn new() -> Self {
        Self {
            input: CameraRig::new(CameraPose::default()),
            tutorial: CameraRig::new(CameraPose::default()),
        }
    }

    pub fn input(&self) -> &CameraRig {
        &self.input
    }

    pub fn tutorial(&self) -> &CameraRig {
        &self.tutorial
    }

    /// Copy the input pose onto the tutorial camera. Called once per frame.
    pub fn sync(&self) {
        self.tutorial.set_pose(self.input.pose());
    }
}

impl Default for DualViewCameras {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cameras = DualViewCameras::new();
        assert_eq!(cameras.input().pose().position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(cameras.tutorial().pose().fov, 50.0);
    }

    #[test]
    fn test_sync_copies_input_pose() {
        let cameras = DualViewCameras::new();
        cameras.input().orbit(std::f32::consts::FRAC_PI_2);
        cameras.input().set_fov(35.0);
        assert_ne!(cameras.tutorial().pose(), cameras.input().pose());

        cameras.sync();
        assert_eq!(cameras.tutorial().pose(), cameras.input().pose());
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let rig = CameraRig::new(CameraPose::default());
        rig.orbit(1.0);
        let p = rig.pose().position;
        let radius = (p.x * p.x + p.z * p.z).sqrt();
        assert!((radius - 50.0f32.sqrt()).abs() < 1e-4);
        assert_eq!(p.y, 5.0);
    }
}
