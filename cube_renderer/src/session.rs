// session.rs - Tutor session wiring the store, the synchronizer and both views
//
// One frame is: sample running animations, fire due cadence ticks (which may
// start new step animations), then mirror the input camera onto the tutorial
// camera.

use std::rc::Rc;
use std::time::Duration;

use crate::animation::{DualViewCameras, DualViewSynchronizer, StepAnimation};
use crate::config::TimingConfig;
use crate::error_handling::SolverError;
use crate::facelets::{Cubelet, CubeletCache};
use crate::notation::{describe_step, timeline_labels};
use crate::playback::{Action, PlaybackSnapshot, PlaybackStore, StoreEvent, TutorState};
use crate::scene::{CubeScene, FrameDriven, TutorialScene};
use crate::solver::SolverService;
use crate::types::SolveResponse;

pub struct TutorSession<S: TutorialScene + FrameDriven = CubeScene> {
    store: PlaybackStore,
    synchronizer: DualViewSynchronizer,
    tutorial: S,
    cameras: DualViewCameras,
    input_cubelets: CubeletCache,
    in_flight: Vec<StepAnimation>,
}

impl TutorSession<CubeScene> {
    pub fn new(timing: &TimingConfig) -> Self {
        Self::with_scene(CubeScene::new(), timing)
    }
}

impl<S: TutorialScene + FrameDriven> TutorSession<S> {
    pub fn with_scene(tutorial: S, timing: &TimingConfig) -> Self {
        let synchronizer = DualViewSynchronizer::builder()
            .rotation_duration(timing.rotation_duration())
            .highlight_duration(timing.highlight_duration())
            .build();

        Self {
            store: PlaybackStore::new(timing.step_interval()),
            synchronizer,
            tutorial,
            cameras: DualViewCameras::new(),
            input_cubelets: CubeletCache::new(),
            in_flight: Vec::new(),
        }
    }

    /// The single entry point for state changes
    pub fn dispatch(&mut self, action: Action) -> Vec<StoreEvent> {
        let events = self.store.dispatch(action);
        self.react(&events);
        events
    }

    /// Advance the session by one frame of `dt`
    pub fn advance(&mut self, dt: Duration) -> Vec<StoreEvent> {
        self.tutorial.advance(dt);
        self.in_flight.retain_mut(|animation| !animation.is_finished());

        let events = self.store.advance(dt);
        self.react(&events);

        self.cameras.sync();
        events
    }

    /// Ask `solver` for a solution of the current input state and load it.
    /// Solver failures are returned untouched and leave the store as it was.
    pub async fn solve<V: SolverService>(&mut self, solver: &V) -> Result<SolveResponse, SolverError> {
        let state = self.store.state().cube_state.clone();
        log::info!("Solving {state}");

        let response = solver.solve(&state).await?;
        log::info!(
            "Solver returned {} step(s) in {:.1}ms",
            response.steps.len(),
            response.solve_time
        );
        self.dispatch(Action::LoadSolution(response.steps.clone()));
        Ok(response)
    }

    /// Pointer click on facelet `slot` of input cubelet `cubelet`
    pub fn pointer_click(&mut self, cubelet: usize, slot: usize) -> Vec<StoreEvent> {
        let cubelets = self.input_cubelets();
        match self.synchronizer.pick_input_facelet(&cubelets, cubelet, slot) {
            Some(index) => self.dispatch(Action::CycleFacelet(index)),
            None => Vec::new(),
        }
    }

    /// Input view cubelets, recomputed only when the cube state changed
    pub fn input_cubelets(&mut self) -> Rc<[Cubelet]> {
        self.input_cubelets.get(&self.store.state().cube_state)
    }

    pub fn state(&self) -> &TutorState {
        self.store.state()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.store.snapshot()
    }

    pub fn timeline(&self) -> Vec<String> {
        timeline_labels(&self.store.state().steps)
    }

    pub fn current_description(&self) -> Option<String> {
        self.store.state().current_step().map(describe_step)
    }

    pub fn tutorial(&self) -> &S {
        &self.tutorial
    }

    pub fn cameras(&self) -> &DualViewCameras {
        &self.cameras
    }

    pub fn in_flight_animations(&self) -> usize {
        self.in_flight.len()
    }

    /// Nothing playing and nothing left to animate
    pub fn is_idle(&self) -> bool {
        !self.store.state().is_playing() && !self.tutorial.is_animating()
    }

    fn react(&mut self, events: &[StoreEvent]) {
        for event in events {
            match event {
                StoreEvent::CursorChanged(cursor) => {
                    let steps = &self.store.state().steps;
                    if let Some(animation) =
                        self.synchronizer.on_cursor_change(steps, *cursor, &mut self.tutorial)
                    {
                        self.in_flight.push(animation);
                    }
                }
                StoreEvent::Reset => {
                    self.tutorial.settle();
                    self.in_flight.clear();
                }
                StoreEvent::PlaybackStarted => log::info!("Playback started"),
                StoreEvent::PlaybackStopped => {
                    log::info!("Playback stopped at step {}", self.store.state().cursor + 1)
                }
                StoreEvent::SolutionLoaded { .. } | StoreEvent::CubeStateChanged(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube_state::{Face, FaceColor};
    use crate::playback::PlaybackStatus;
    use crate::types::{Axis, Step};
    use std::f32::consts::FRAC_PI_2;

    struct FailingSolver;

    impl SolverService for FailingSolver {
        async fn solve(&self, _state: &crate::cube_state::CubeState) -> Result<SolveResponse, SolverError> {
            Err(SolverError::Transport("connection refused".to_string()))
        }
    }

    struct StaticSolver(Vec<Step>);

    impl SolverService for StaticSolver {
        async fn solve(&self, _state: &crate::cube_state::CubeState) -> Result<SolveResponse, SolverError> {
            Ok(SolveResponse {
                steps: self.0.clone(),
                solve_time: 1.0,
            })
        }
    }

    fn two_moves() -> Vec<Step> {
        vec![
            Step::new("R", Axis::X, -FRAC_PI_2, Face::Right),
            Step::new("U", Axis::Y, -FRAC_PI_2, Face::Top),
        ]
    }

    #[tokio::test]
    async fn test_solve_loads_and_animates_first_step() {
        let mut session = TutorSession::new(&TimingConfig::default());
        let response = session.solve(&StaticSolver(two_moves())).await.unwrap();
        assert_eq!(response.steps.len(), 2);
        assert_eq!(session.state().cursor, 0);
        assert_eq!(session.in_flight_animations(), 1);
        assert_eq!(session.timeline(), vec!["1. R", "2. U"]);
        assert_eq!(
            session.current_description().as_deref(),
            Some("Rotate the Right face clockwise")
        );
    }

    #[tokio::test]
    async fn test_solve_failure_propagates() {
        let mut session = TutorSession::new(&TimingConfig::default());
        session.dispatch(Action::LoadSolution(two_moves()));

        let err = session.solve(&FailingSolver).await.unwrap_err();
        assert!(matches!(err, SolverError::Transport(_)));
        assert_eq!(session.state().steps.len(), 2);
    }

    #[test]
    fn test_playback_drives_tutorial_scene() {
        let mut session = TutorSession::new(&TimingConfig::default());
        session.dispatch(Action::LoadSolution(two_moves()));
        session.dispatch(Action::Play);

        // First step (R) finishes its rotation well before the tick.
        session.advance(Duration::from_millis(600));
        let group = session.tutorial().group().unwrap().rotation();
        assert_eq!(group.x, -FRAC_PI_2);

        let events = session.advance(Duration::from_millis(900));
        assert_eq!(
            events,
            vec![StoreEvent::CursorChanged(1), StoreEvent::PlaybackStopped]
        );
        assert_eq!(session.state().status, PlaybackStatus::Stopped);

        for _ in 0..40 {
            session.advance(Duration::from_millis(16));
        }
        assert_eq!(session.tutorial().group().unwrap().rotation().y, -FRAC_PI_2);
        assert!(session.is_idle());
        assert_eq!(session.in_flight_animations(), 0);
    }

    #[test]
    fn test_pointer_click_cycles_input_facelet() {
        let mut session = TutorSession::new(&TimingConfig::default());
        let before = session.input_cubelets();
        let events = session.pointer_click(25, 0);
        assert_eq!(events.len(), 1);
        assert_eq!(session.state().cube_state.color(8), Some(FaceColor::Yellow));

        let after = session.input_cubelets();
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(session.pointer_click(40, 0).is_empty());
    }

    #[test]
    fn test_reset_settles_tutorial() {
        let mut session = TutorSession::new(&TimingConfig::default());
        session.dispatch(Action::LoadSolution(two_moves()));
        session.advance(Duration::from_millis(100));
        session.dispatch(Action::Reset);

        assert!(session.is_idle());
        assert_eq!(session.tutorial().group().unwrap().rotation().x, 0.0);
        assert!(session.state().cube_state.is_solved());
    }

    #[test]
    fn test_reset_from_later_step_replays_step_zero() {
        let steps = vec![
            Step::new("R", Axis::X, -FRAC_PI_2, Face::Right),
            Step::new("U", Axis::Y, -FRAC_PI_2, Face::Top),
            Step::new("F", Axis::Z, -FRAC_PI_2, Face::Front),
            Step::new("L", Axis::X, FRAC_PI_2, Face::Left),
        ];
        let mut session = TutorSession::new(&TimingConfig::default());
        session.dispatch(Action::LoadSolution(steps));
        session.dispatch(Action::JumpTo(3));
        session.advance(Duration::from_millis(100));

        let events = session.dispatch(Action::Reset);
        assert!(events.contains(&StoreEvent::CursorChanged(0)));
        assert_eq!(session.in_flight_animations(), 1);

        // Step 0 rotation starts from rest
        session.advance(Duration::from_millis(600));
        let rotation = session.tutorial().group().unwrap().rotation();
        assert_eq!(rotation.x, -FRAC_PI_2);
        assert_eq!(rotation.z, 0.0);
    }

    #[test]
    fn test_cameras_follow_input() {
        let mut session = TutorSession::new(&TimingConfig::default());
        session.cameras().input().orbit(0.5);
        session.advance(Duration::from_millis(16));
        assert_eq!(session.cameras().tutorial().pose(), session.cameras().input().pose());
    }
}
