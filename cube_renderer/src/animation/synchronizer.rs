// animation/synchronizer.rs - Coordinates the input and tutorial views
//
// On every cursor change the tutorial scene gets a rotation and a face
// highlight for the selected step. The rotation is always started before the
// highlight; the two then run side by side. Pointer edits on the input view
// are independent of playback and only ever rewrite the cube state.

use std::time::Duration;

use super::Completion;
use crate::cube_state::CubeState;
use crate::facelets::{pick_facelet, Cubelet};
use crate::scene::TutorialScene;
use crate::types::Step;

/// Default duration of the step rotation
pub const DEFAULT_ROTATION_DURATION: Duration = Duration::from_millis(600);

/// Default duration of the face highlight
pub const DEFAULT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Animations started for one step
#[derive(Debug)]
pub struct StepAnimation {
    pub step_index: usize,
    pub rotation: Completion,
    pub highlight: Completion,
}

impl StepAnimation {
    /// Wait for both the rotation and the highlight to end
    pub async fn finished(self) {
        futures::join!(self.rotation, self.highlight);
    }

    pub fn is_finished(&mut self) -> bool {
        // Evaluate both so each releases its receiver once resolved
        let rotation = self.rotation.is_resolved();
        let highlight = self.highlight.is_resolved();
        rotation && highlight
    }
}

#[derive(Debug, Clone)]
pub struct DualViewSynchronizer {
    rotation_duration: Duration,
    highlight_duration: Duration,
}

impl DualViewSynchronizer {
    pub fn builder() -> SynchronizerBuilder {
        SynchronizerBuilder::default()
    }

    pub fn rotation_duration(&self) -> Duration {
        self.rotation_duration
    }

    pub fn highlight_duration(&self) -> Duration {
        self.highlight_duration
    }

    /// Drive the tutorial scene for the step under `cursor`.
    /// Returns None when there is nothing to animate.
    pub fn on_cursor_change<S: TutorialScene + ?Sized>(
        &self,
        steps: &[Step],
        cursor: usize,
        scene: &mut S,
    ) -> Option<StepAnimation> {
        let step = steps.get(cursor)?;
        log::debug!(
            "Animating step {} ({}) about {:?}",
            cursor + 1,
            step.notation,
            step.rotation_axis
        );

        let rotation = scene.rotate(step.rotation_axis, step.rotation_amount, self.rotation_duration);
        let highlight = scene.highlight(step.face_index, self.highlight_duration);

        Some(StepAnimation {
            step_index: cursor,
            rotation,
            highlight,
        })
    }

    /// Resolve a pointer hit on the input view to the state index to cycle
    pub fn pick_input_facelet(&self, cubelets: &[Cubelet], cubelet: usize, slot: usize) -> Option<usize> {
        let index = pick_facelet(cubelets, cubelet, slot);
        if index.is_none() {
            log::debug!("Pointer hit ({cubelet}, {slot}) is not a facelet");
        }
        index
    }

    /// New input state after cycling the color of facelet `index`
    pub fn apply_pointer_edit(&self, state: &CubeState, index: usize) -> CubeState {
        state.with_cycled_facelet(index)
    }
}

impl Default for DualViewSynchronizer {
    fn default() -> Self {
        SynchronizerBuilder::default().build()
    }
}

#[derive(Debug, Clone)]
pub struct SynchronizerBuilder {
    rotation_duration: Duration,
    highlight_duration: Duration,
}

impl SynchronizerBuilder {
    pub fn rotation_duration(mut self, duration: Duration) -> Self {
        self.rotation_duration = duration;
        self
    }

    pub fn highlight_duration(mut self, duration: Duration) -> Self {
        self.highlight_duration = duration;
        self
    }

    pub fn build(self) -> DualViewSynchronizer {
        DualViewSynchronizer {
            rotation_duration: self.rotation_duration,
            highlight_duration: self.highlight_duration,
        }
    }
}

impl Default for SynchronizerBuilder {
    fn default() -> Self {
        Self {
            rotation_duration: DEFAULT_ROTATION_DURATION,
            highlight_duration: DEFAULT_HIGHLIGHT_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube_state::{Face, FaceColor};
    use crate::facelets::cubelets_for;
    use crate::scene::{CubeScene, FrameDriven};
    use crate::types::Axis;

    #[derive(Default)]
    struct RecordingScene {
        calls: Vec<String>,
    }

    impl TutorialScene for RecordingScene {
        fn rotate(&mut self, axis: Axis, angle: f32, duration: Duration) -> Completion {
            self.calls.push(format!("rotate {axis:?} {angle} {}", duration.as_millis()));
            Completion::resolved()
        }

        fn highlight(&mut self, face_index: usize, duration: Duration) -> Completion {
            self.calls.push(format!("highlight {face_index} {}", duration.as_millis()));
            Completion::resolved()
        }
    }

    fn sample_steps() -> Vec<Step> {
        vec![
            Step::new("R", Axis::X, -1.5, Face::Right),
            Step::new("U", Axis::Y, -1.5, Face::Top),
        ]
    }

    #[test]
    fn test_rotation_started_before_highlight() {
        let sync = DualViewSynchronizer::default();
        let mut scene = RecordingScene::default();
        let animation = sync.on_cursor_change(&sample_steps(), 1, &mut scene).unwrap();

        assert_eq!(animation.step_index, 1);
        assert_eq!(scene.calls, vec!["rotate Y -1.5 600", "highlight 0 500"]);
    }

    #[test]
    fn test_invalid_cursor_does_nothing() {
        let sync = DualViewSynchronizer::default();
        let mut scene = RecordingScene::default();
        assert!(sync.on_cursor_change(&[], 0, &mut scene).is_none());
        assert!(sync.on_cursor_change(&sample_steps(), 2, &mut scene).is_none());
        assert!(scene.calls.is_empty());
    }

    #[test]
    fn test_builder_durations() {
        let sync = DualViewSynchronizer::builder()
            .rotation_duration(Duration::from_millis(100))
            .highlight_duration(Duration::from_millis(50))
            .build();
        let mut scene = RecordingScene::default();
        sync.on_cursor_change(&sample_steps(), 0, &mut scene);
        assert_eq!(scene.calls, vec!["rotate X -1.5 100", "highlight 4 50"]);
    }

    #[tokio::test]
    async fn test_finished_after_frames() {
        let sync = DualViewSynchronizer::default();
        let mut scene = CubeScene::new();
        let mut animation = sync.on_cursor_change(&sample_steps(), 0, &mut scene).unwrap();
        assert!(!animation.is_finished());

        scene.advance(Duration::from_millis(600));
        assert!(animation.is_finished());
        animation.finished().await;
    }

    #[test]
    fn test_pointer_edit() {
        let sync = DualViewSynchronizer::default();
        let state = CubeState::solved();
        let cubelets = cubelets_for(&state);

        let index = sync.pick_input_facelet(&cubelets, 25, 0).unwrap();
        assert_eq!(index, 8);
        let edited = sync.apply_pointer_edit(&state, index);
        assert_eq!(edited.color(8), Some(FaceColor::Yellow));
        assert!(sync.pick_input_facelet(&cubelets, 0, 5).is_none());
    }
}
