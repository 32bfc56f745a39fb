// playback.rs - Authoritative tutor store and the playback state machine
//
// Every change to the cursor, the play flag, the step list or the cube state
// goes through `PlaybackStore::dispatch`. The cadence timer lives inside the
// store and is driven by `advance(dt)`; ticks are ordinary `Action::Tick`
// dispatches.

use std::time::Duration;

use serde::Serialize;

use crate::cube_state::CubeState;
use crate::types::Step;

/// Default time between automatic steps
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TutorState {
    pub cube_state: CubeState,
    pub steps: Vec<Step>,
    pub cursor: usize,
    pub status: PlaybackStatus,
}

impl TutorState {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

impl Default for TutorState {
    fn default() -> Self {
        Self {
            cube_state: CubeState::solved(),
            steps: Vec::new(),
            cursor: 0,
            status: PlaybackStatus::Stopped,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the step list wholesale after a solve
    LoadSolution(Vec<Step>),
    Play,
    Pause,
    Next,
    Previous,
    JumpTo(usize),
    /// One cadence interval elapsed
    Tick,
    Reset,
    SetCubeState(CubeState),
    /// Pointer edit on the input view
    CycleFacelet(usize),
}

/// What a dispatch changed, for the views to react to
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    SolutionLoaded { steps: usize },
    CursorChanged(usize),
    PlaybackStarted,
    PlaybackStopped,
    CubeStateChanged(CubeState),
    Reset,
}

/// Progress numbers for the presentation shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub cursor: usize,
    pub total: usize,
    pub remaining: usize,
    pub playing: bool,
    pub progress: f64,
}

/// The single active cadence timer. A fresh generation is minted on every
/// `play()`, so a paused-and-resumed run never inherits stale elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CadenceTimer {
    generation: u64,
    elapsed: Duration,
}

#[derive(Debug)]
pub struct PlaybackStore {
    state: TutorState,
    timer: Option<CadenceTimer>,
    interval: Duration,
    generations: u64,
}

impl PlaybackStore {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: TutorState::default(),
            timer: None,
            interval,
            generations: 0,
        }
    }

    pub fn state(&self) -> &TutorState {
        &self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn has_active_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Generation of the running timer, if any
    pub fn timer_generation(&self) -> Option<u64> {
        self.timer.map(|t| t.generation)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let total = self.state.steps.len();
        let cursor = self.state.cursor;
        PlaybackSnapshot {
            cursor,
            total,
            remaining: total.saturating_sub(cursor + 1),
            playing: self.state.is_playing(),
            progress: if total == 0 {
                0.0
            } else {
                (cursor + 1) as f64 / total as f64
            },
        }
    }

    /// Apply one action. Returns the resulting events in order.
    pub fn dispatch(&mut self, action: Action) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        match action {
            Action::LoadSolution(steps) => {
                self.stop(&mut events);
                let count = steps.len();
                self.state.steps = steps;
                self.state.cursor = 0;
                log::info!("Loaded solution with {count} step(s)");
                events.push(StoreEvent::SolutionLoaded { steps: count });
                if count > 0 {
                    events.push(StoreEvent::CursorChanged(0));
                }
            }
            Action::Play => {
                if self.state.steps.is_empty() {
                    log::debug!("Play ignored: no steps loaded");
                } else if !self.state.is_playing() {
                    self.generations += 1;
                    self.timer = Some(CadenceTimer {
                        generation: self.generations,
                        elapsed: Duration::ZERO,
                    });
                    self.state.status = PlaybackStatus::Playing;
                    log::debug!("Playback started (timer #{})", self.generations);
                    events.push(StoreEvent::PlaybackStarted);
                }
            }
            Action::Pause => self.stop(&mut events),
            Action::Next => {
                let target = (self.state.cursor + 1).min(self.state.last_index());
                self.move_cursor(target, &mut events);
            }
            Action::Previous => {
                let target = self.state.cursor.saturating_sub(1);
                self.move_cursor(target, &mut events);
            }
            Action::JumpTo(index) => {
                let target = index.min(self.state.last_index());
                self.move_cursor(target, &mut events);
            }
            Action::Tick => {
                if self.state.is_playing() {
                    let last = self.state.last_index();
                    if self.state.cursor < last {
                        self.move_cursor(self.state.cursor + 1, &mut events);
                    }
                    if self.state.cursor >= last {
                        log::debug!("Reached final step, stopping playback");
                        self.stop(&mut events);
                    }
                }
            }
            Action::Reset => {
                self.stop(&mut events);
                let moved = self.state.cursor != 0 && !self.state.steps.is_empty();
                self.state.cursor = 0;
                self.state.cube_state = CubeState::solved();
                events.push(StoreEvent::Reset);
                // After `Reset` so the scene settles before step 0 replays
                if moved {
                    events.push(StoreEvent::CursorChanged(0));
                }
            }
            Action::SetCubeState(cube_state) => {
                self.set_cube_state(cube_state, &mut events);
            }
            Action::CycleFacelet(index) => {
                let next = self.state.cube_state.with_cycled_facelet(index);
                self.set_cube_state(next, &mut events);
            }
        }
        events
    }

    /// Feed elapsed time to the cadence timer, dispatching one `Tick` per
    /// full interval. Stops early once a tick ends playback.
    pub fn advance(&mut self, dt: Duration) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        let Some(timer) = self.timer.as_mut() else {
            return events;
        };
        timer.elapsed += dt;

        loop {
            let due = match self.timer.as_mut() {
                Some(timer) if !self.interval.is_zero() && timer.elapsed >= self.interval => {
                    timer.elapsed -= self.interval;
                    true
                }
                _ => false,
            };
            if !due {
                break;
            }
            events.extend(self.dispatch(Action::Tick));
        }
        events
    }

    fn move_cursor(&mut self, target: usize, events: &mut Vec<StoreEvent>) {
        if self.state.steps.is_empty() || target == self.state.cursor {
            return;
        }
        self.state.cursor = target;
        events.push(StoreEvent::CursorChanged(target));
    }

    fn stop(&mut self, events: &mut Vec<StoreEvent>) {
        self.timer = None;
        if self.state.is_playing() {
            self.state.status = PlaybackStatus::Stopped;
            log::debug!("Playback stopped at step {}", self.state.cursor);
            events.push(StoreEvent::PlaybackStopped);
        }
    }

    fn set_cube_state(&mut self, cube_state: CubeState, events: &mut Vec<StoreEvent>) {
        if cube_state != self.state.cube_state {
            self.state.cube_state = cube_state.clone();
            events.push(StoreEvent::CubeStateChanged(cube_state));
        }
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}
