//! The `cram serve` command: HTTP endpoint for session plan requests.
//!
//! One route, `POST /api/sessions`. The handler is a linear pipeline with
//! early-exit failure at each gate; every failure maps to a fixed error
//! body so callers can tell the failure points apart.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use cram_core::openai::{OpenAiClient, OpenAiError};
use cram_core::plan::StudyPlan;
use cram_core::service::{PlanSessionError, plan_session};
use cram_core::session::SessionRequest;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn use_post() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Use POST",
            details: None,
        }
    }

    pub fn missing_fields() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Missing fields",
            details: None,
        }
    }

    pub fn openai_error(details: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "OpenAI error",
            details: Some(details),
        }
    }

    pub fn no_structured_output() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "No structured output found",
            details: None,
        }
    }

    pub fn minutes_mismatch() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Plan minutes do not sum to duration",
            details: None,
        }
    }

    pub fn server_error(err: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server error",
            details: Some(err.to_string()),
        }
    }
}

impl From<PlanSessionError> for AppError {
    fn from(err: PlanSessionError) -> Self {
        match err {
            PlanSessionError::Upstream(OpenAiError::Api { body, .. }) => Self::openai_error(body),
            PlanSessionError::Upstream(OpenAiError::Transport(e)) => {
                Self::openai_error(e.to_string())
            }
            PlanSessionError::Upstream(OpenAiError::NoStructuredOutput) => {
                Self::no_structured_output()
            }
            PlanSessionError::Decode(e) => Self::server_error(e),
            PlanSessionError::Invalid(_) => Self::minutes_mismatch(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = match self.details {
            Some(details) => serde_json::json!({ "error": self.message, "details": details }),
            None => serde_json::json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    pub client: OpenAiClient,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/sessions",
            post(create_session).fallback(method_not_allowed),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(client: OpenAiClient, bind: &str, port: u16) -> Result<()> {
    let app = build_router(AppState { client });
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("cram serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("cram serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn method_not_allowed() -> AppError {
    AppError::use_post()
}

async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<StudyPlan>, AppError> {
    let params = req.validate().map_err(|_| AppError::missing_fields())?;

    tracing::info!(
        duration = params.duration_minutes,
        energy = params.energy_level,
        study_type = %params.study_type,
        "session plan requested"
    );

    let plan = plan_session(&state.client, &params).await?;
    Ok(Json(plan))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
