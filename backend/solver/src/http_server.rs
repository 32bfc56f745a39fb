// backend/solver/src/http_server.rs
use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use serde::de::DeserializeOwned;
use thiserror::Error;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use rubiks_cube_renderer::{SolveRequest, SolverError};

use crate::scripted_solver::ScriptedSolver;

/// Default request body limit for the JSON endpoints
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

// ============= Custom Error Handling =============

#[derive(Debug, Error)]
#[error("{message}")]
struct ServiceError {
    message: String,
    status_code: StatusCode,
}

impl warp::reject::Reject for ServiceError {}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(service_err) = err.find::<ServiceError>() {
        code = service_err.status_code;
        message = service_err.message.clone();
    } else if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = format!("Invalid request body: {body_err}");
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = "Payload too large".to_string();
    } else {
        log::error!("unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    let json = warp::reply::json(&serde_json::json!({
        "error": message,
        "status_code": code.as_u16(),
    }));

    Ok(warp::reply::with_status(json, code))
}

// ============= CORS Configuration =============

pub fn with_cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Accept", "Content-Type", "X-Requested-With"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .max_age(3600)
}

// ============= Middleware & Filters =============

fn with_solver(
    solver: Arc<ScriptedSolver>,
) -> impl Filter<Extract = (Arc<ScriptedSolver>,), Error = Infallible> + Clone {
    warp::any().map(move || solver.clone())
}

fn json_body<T: DeserializeOwned + Send>(
    limit: u64,
) -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(limit).and(warp::body::json())
}

// ============= Request Handlers =============

async fn handle_health() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "rubiks-solver",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

async fn handle_solve(
    request: SolveRequest,
    solver: Arc<ScriptedSolver>,
) -> Result<impl Reply, Rejection> {
    match solver.solve_raw(&request.cube_state) {
        Ok(response) => {
            log::info!(
                "Solved in {:.3}ms with {} step(s)",
                response.solve_time,
                response.steps.len()
            );
            Ok(warp::reply::json(&response))
        }
        Err(SolverError::Rejected(reason)) => {
            log::warn!("Rejected cube state: {reason}");
            Err(warp::reject::custom(ServiceError {
                message: reason,
                status_code: StatusCode::BAD_REQUEST,
            }))
        }
        Err(e) => {
            log::error!("Solve failed: {e}");
            Err(warp::reject::custom(ServiceError {
                message: e.to_string(),
                status_code: StatusCode::INTERNAL_SERVER_ERROR,
            }))
        }
    }
}

async fn handle_validate(
    request: SolveRequest,
    solver: Arc<ScriptedSolver>,
) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&solver.validate(&request.cube_state)))
}

// ============= Routes =============

/// All API routes with rejection recovery, without CORS or access logging
pub fn api(
    solver: Arc<ScriptedSolver>,
    config: &ServerConfig,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path!("health")
        .and(warp::get())
        .and_then(handle_health);

    let solve = warp::path!("api" / "solve")
        .and(warp::post())
        .and(json_body::<SolveRequest>(config.max_body_bytes))
        .and(with_solver(solver.clone()))
        .and_then(handle_solve);

    let validate = warp::path!("api" / "validate")
        .and(warp::post())
        .and(json_body::<SolveRequest>(config.max_body_bytes))
        .and(with_solver(solver))
        .and_then(handle_validate);

    health.or(solve).or(validate).recover(handle_rejection)
}

// ============= Server Initialization =============

pub async fn start_server(config: ServerConfig, solver: ScriptedSolver) -> Result<()> {
    let routes = api(Arc::new(solver), &config)
        .with(with_cors())
        .with(warp::log("solver_service"));

    log::info!(
        "Starting solver HTTP server on port {} (max body {} bytes)",
        config.port,
        config.max_body_bytes
    );
    let addr = ([0, 0, 0, 0], config.port);
    warp::serve(routes).run(addr).await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubiks_cube_renderer::{CubeState, SolveResponse, ValidationResponse, SOLVED_STATE};

    fn test_api() -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
        api(Arc::new(ScriptedSolver::new()), &ServerConfig::default())
    }

    #[tokio::test]
    async fn test_health() {
        let resp = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&test_api())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_solve_solved_state() {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/solve")
            .json(&serde_json::json!({ "cubeState": SOLVED_STATE }))
            .reply(&test_api())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: SolveResponse = serde_json::from_slice(resp.body()).unwrap();
        assert!(body.steps.is_empty());
    }

    #[tokio::test]
    async fn test_solve_unsolved_state() {
        let state = CubeState::solved().with_cycled_facelet(30).to_string();
        let resp = warp::test::request()
            .method("POST")
            .path("/api/solve")
            .json(&serde_json::json!({ "cubeState": state }))
            .reply(&test_api())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["steps"][0]["move"], "R");
        assert_eq!(body["steps"][0]["rotationAxis"], "x");
        assert_eq!(body["steps"][1]["move"], "U");
        assert_eq!(body["steps"][1]["faceIndex"], 0);
    }

    #[tokio::test]
    async fn test_wrong_length_is_bad_request() {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/solve")
            .json(&serde_json::json!({ "cubeState": "WWW" }))
            .reply(&test_api())
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status_code"], 400);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/solve")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&test_api())
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate() {
        let resp = warp::test::request()
            .method("POST")
            .path("/api/validate")
            .json(&serde_json::json!({ "cubeState": SOLVED_STATE }))
            .reply(&test_api())
            .await;
        let body: ValidationResponse = serde_json::from_slice(resp.body()).unwrap();
        assert!(body.valid);

        let resp = warp::test::request()
            .method("POST")
            .path("/api/validate")
            .json(&serde_json::json!({ "cubeState": "WWW" }))
            .reply(&test_api())
            .await;
        let body: ValidationResponse = serde_json::from_slice(resp.body()).unwrap();
        assert!(!body.valid);
        assert!(body.error.is_some());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let resp = warp::test::request()
            .method("GET")
            .path("/api/unknown")
            .reply(&test_api())
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let routes = test_api().with(with_cors());
        let resp = warp::test::request()
            .method("OPTIONS")
            .path("/api/solve")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .reply(&routes)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }
}
