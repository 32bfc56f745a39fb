// main.rs - Solver HTTP service entry point

use anyhow::{Context, Result};
use clap::Parser;

use rubiks_solver_service::{start_server, ScriptedSolver, ServerConfig, DEFAULT_MAX_BODY_BYTES};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Largest accepted JSON request body
    #[arg(long, env = "SOLVER_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    max_body_bytes: u64,

    /// Moves returned for every unsolved cube
    #[arg(long)]
    script: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::debug!("Starting with {args:?}");

    let solver = match &args.script {
        Some(script) => ScriptedSolver::with_script(script).context("Invalid --script")?,
        None => ScriptedSolver::new(),
    };

    let config = ServerConfig {
        port: args.port,
        max_body_bytes: args.max_body_bytes,
    };
    start_server(config, solver).await
}
