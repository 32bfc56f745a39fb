// main.rs - Headless tutor: solve a cube state and play the solution back

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tokio::time::MissedTickBehavior;

use rubiks_cube_renderer::frame_stats::FrameStats;
use rubiks_cube_renderer::notation::{describe_step, parse_algorithm};
use rubiks_cube_renderer::{
    Action, CubeState, FixtureSolver, SolveResponse, SolverError, SolverService, StoreEvent,
    TimingConfig, TutorSession,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 54-character cube state (Top, Bottom, Front, Back, Right, Left)
    #[arg(short, long)]
    pub state: Option<String>,

    /// Solution JSON file in solver response format
    #[arg(long, conflicts_with = "moves")]
    pub solution: Option<PathBuf>,

    /// Space separated moves to play instead of a solution file
    #[arg(short, long, default_value = "R U R' U'")]
    pub moves: String,

    /// Timing config JSON file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the time between steps
    #[arg(long)]
    pub step_interval_ms: Option<u64>,

    /// Override the frame interval
    #[arg(long)]
    pub frame_ms: Option<u64>,

    /// Pace frames on the wall clock instead of running as fast as possible
    #[arg(long)]
    pub realtime: bool,
}

/// Plays a fixed algorithm regardless of the cube state
struct AlgorithmSolver {
    algorithm: String,
}

impl SolverService for AlgorithmSolver {
    async fn solve(&self, _state: &CubeState) -> Result<SolveResponse, SolverError> {
        let started = Instant::now();
        let moves = parse_algorithm(&self.algorithm)
            .map_err(|e| SolverError::Rejected(e.to_string()))?;
        Ok(SolveResponse {
            steps: moves.iter().map(|m| m.to_step()).collect(),
            solve_time: started.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

async fn load_timing(args: &Args) -> Result<TimingConfig> {
    let mut timing = match &args.config {
        Some(path) => TimingConfig::load(path)
            .await
            .with_context(|| format!("Failed to load timing config from {}", path.display()))?,
        None => TimingConfig::default(),
    };
    if let Some(ms) = args.step_interval_ms {
        timing.step_interval_ms = ms;
    }
    if let Some(ms) = args.frame_ms {
        timing.frame_interval_ms = ms;
    }
    timing.validate().context("Invalid timing overrides")?;
    Ok(timing)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let timing = load_timing(&args).await?;
    let mut session = TutorSession::new(&timing);

    if let Some(raw) = &args.state {
        let state = CubeState::parse(raw).context("Invalid --state")?;
        if let Err(e) = state.validate() {
            warn!("Cube state is not physically plausible: {e}");
        }
        session.dispatch(Action::SetCubeState(state));
    }

    let response = match &args.solution {
        Some(path) => session.solve(&FixtureSolver::new(path)).await,
        None => {
            session
                .solve(&AlgorithmSolver {
                    algorithm: args.moves.clone(),
                })
                .await
        }
    }
    .context("Solve failed")?;

    if response.steps.is_empty() {
        info!("Cube is already solved, nothing to play");
        return Ok(());
    }
    for label in session.timeline() {
        info!("  {label}");
    }

    session.dispatch(Action::Play);
    log_step(&session);

    let frame = timing.frame_interval();
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stats = FrameStats::default();
    let mut last = Instant::now();
    let started = last;

    while !session.is_idle() {
        let dt = if args.realtime {
            ticker.tick().await;
            let now = Instant::now();
            let dt = now - last;
            last = now;
            dt
        } else {
            frame
        };
        stats.record_frame(dt);

        for event in session.advance(dt) {
            if let StoreEvent::CursorChanged(_) = event {
                log_step(&session);
            }
        }

        if stats.total_frames() % 120 == 0 {
            info!("{}", stats.report());
        }
    }

    let snapshot = session.snapshot();
    info!(
        "Playback finished after {} frames ({:?} wall clock): {}",
        stats.total_frames(),
        started.elapsed(),
        serde_json::to_string(&snapshot)?
    );
    if let Some(group) = session.tutorial().group() {
        info!("Final tutorial rotation: {:?}", group.rotation());
    }
    info!("Camera: {:?}", session.cameras().tutorial().pose());
    info!("{}", stats.report());
    Ok(())
}

fn log_step(session: &TutorSession) {
    let state = session.state();
    if let Some(step) = state.current_step() {
        info!(
            "Step {}/{}: {} ({})",
            state.cursor + 1,
            state.steps.len(),
            step.notation,
            describe_step(step)
        );
    }
}
