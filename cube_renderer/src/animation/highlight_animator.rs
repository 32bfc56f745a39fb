// animation/highlight_animator.rs - Emissive pulse on a face material
//
// A pulse ramps linearly from the current intensity up to PEAK_INTENSITY over
// the first half of the duration, then back down to the base intensity over
// the second half. The base is written back exactly when the pulse ends.

use std::rc::{Rc, Weak};
use std::time::Duration;

use super::{Completion, CompletionSignal, Tween};
use crate::scene::FaceMaterial;

/// Emissive intensity at the top of a pulse
pub const PEAK_INTENSITY: f32 = 3.0;

enum PulsePhase {
    Rising(Tween<f32>),
    Falling(Tween<f32>),
}

struct HighlightJob {
    material: Weak<FaceMaterial>,
    base: f32,
    phase: PulsePhase,
    fall_duration: Duration,
    signal: CompletionSignal,
}

impl HighlightJob {
    fn step(&mut self, dt: Duration) -> bool {
        let Some(material) = self.material.upgrade() else {
            self.signal.resolve();
            return false;
        };

        let active = match &mut self.phase {
            PulsePhase::Rising(tween) => {
                if tween.update(dt) {
                    material.set_emissive_intensity(*tween.current());
                    true
                } else {
                    let mut fall = Tween::new(PEAK_INTENSITY, self.base, self.fall_duration);
                    let active = fall.update(tween.overflow());
                    material.set_emissive_intensity(*fall.current());
                    self.phase = PulsePhase::Falling(fall);
                    active
                }
            }
            PulsePhase::Falling(tween) => {
                let active = tween.update(dt);
                material.set_emissive_intensity(*tween.current());
                active
            }
        };

        if !active {
            material.set_emissive_intensity(self.base);
            self.signal.resolve();
        }
        active
    }

    fn cancel(&mut self) {
        if let Some(material) = self.material.upgrade() {
            material.set_emissive_intensity(self.base);
        }
        self.signal.resolve();
    }
}

#[derive(Default)]
pub struct HighlightAnimator {
    jobs: Vec<HighlightJob>,
}

impl HighlightAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulse `material` over `duration`. Resolves immediately when the
    /// material is absent or the duration is zero.
    ///
    /// Re-pulsing a face mid-pulse keeps the original base intensity so
    /// repeated highlights never drift.
    pub fn animate(&mut self, material: Option<&Rc<FaceMaterial>>, duration: Duration) -> Completion {
        let Some(material) = material else {
            log::debug!("No face material to highlight, resolving immediately");
            return Completion::resolved();
        };
        if duration.is_zero() {
            return Completion::resolved();
        }

        let weak = Rc::downgrade(material);
        let mut base = material.emissive_intensity();
        self.jobs.retain_mut(|job| {
            if job.material.ptr_eq(&weak) {
                base = job.base;
                job.signal.resolve();
                false
            } else {
                true
            }
        });

        let rise_duration = duration / 2;
        let (signal, completion) = Completion::channel();
        self.jobs.push(HighlightJob {
            material: weak,
            base,
            phase: PulsePhase::Rising(Tween::new(
                material.emissive_intensity(),
                PEAK_INTENSITY,
                rise_duration,
            )),
            fall_duration: duration - rise_duration,
            signal,
        });
        completion
    }

    pub fn advance(&mut self, dt: Duration) {
        self.jobs.retain_mut(|job| job.step(dt));
    }

    pub fn active_count(&self) -> usize {
        self.jobs.len()
    }

    /// Stop all pulses, restoring base intensities
    pub fn cancel_all(&mut self) {
        for mut job in self.jobs.drain(..) {
            job.cancel();
        }
    }
}
