// animation/rotation_animator.rs - Eased single-axis rotation of a scene object

use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{Completion, CompletionSignal, Easing, Tween};
use crate::scene::SceneObject;
use crate::types::Axis;

struct RotationJob {
    target: Weak<SceneObject>,
    axis: Axis,
    tween: Tween<f32>,
    signal: CompletionSignal,
}

impl RotationJob {
    /// Sample one frame. Returns false once the job is done.
    fn step(&mut self, dt: Duration) -> bool {
        let Some(target) = self.target.upgrade() else {
            log::debug!("Rotation target dropped mid-flight, resolving");
            self.signal.resolve();
            return false;
        };

        let active = self.tween.update(dt);
        target.set_rotation_component(self.axis, *self.tween.current());

        if !active {
            log::debug!("Rotation about {:?} finished", self.axis);
            self.signal.resolve();
        }
        active
    }

    /// Snap to the end angle and resolve
    fn finish(&mut self) {
        self.tween.finish();
        if let Some(target) = self.target.upgrade() {
            target.set_rotation_component(self.axis, *self.tween.end());
        }
        self.signal.resolve();
    }
}

/// Drives rotations of scene objects, one tween per started rotation
#[derive(Default)]
pub struct RotationAnimator {
    jobs: Vec<RotationJob>,
}

impl RotationAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate `target` by `delta` radians about `axis` over `duration`.
    ///
    /// The angle follows quadratic ease in/out from the object's current
    /// angle. A missing target resolves immediately. Starting a rotation on
    /// an object that is still turning snaps the earlier one to its end
    /// first, so consecutive quarter turns never lose angle.
    pub fn animate(
        &mut self,
        target: Option<&Rc<SceneObject>>,
        axis: Axis,
        delta: f32,
        duration: Duration,
    ) -> Completion {
        let Some(target) = target else {
            log::debug!("No rotation target, resolving immediately");
            return Completion::resolved();
        };

        let weak = Rc::downgrade(target);
        self.jobs.retain_mut(|job| {
            if job.target.ptr_eq(&weak) {
                job.finish();
                false
            } else {
                true
            }
        });

        let start = target.rotation().component(axis);
        let end = start + delta;
        if duration.is_zero() {
            target.set_rotation_component(axis, end);
            return Completion::resolved();
        }

        log::debug!(
            "Rotating about {:?} by {:.3} rad over {:?}",
            axis,
            delta,
            duration
        );
        let (signal, completion) = Completion::channel();
        self.jobs.push(RotationJob {
            target: weak,
            axis,
            tween: Tween::new(start, end, duration).with_easing(Easing::QuadInOut),
            signal,
        });
        completion
    }

    /// Sample every running rotation once
    pub fn advance(&mut self, dt: Duration) {
        self.jobs.retain_mut(|job| job.step(dt));
    }

    pub fn active_count(&self) -> usize {
        self.jobs.len()
    }

    /// Finish all running rotations at their end angles
    pub fn finish_all(&mut self) {
        for mut job in self.jobs.drain(..) {
            job.finish();
        }
    }
}
