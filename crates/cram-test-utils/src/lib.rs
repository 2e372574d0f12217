//! Shared test utilities for cram integration tests.
//!
//! Provides an in-process stand-in for the completion API: an axum router
//! bound to an ephemeral port that answers `POST /responses` with a canned
//! status and body, and records every request body it receives so tests can
//! assert on the outbound contract.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Handle to a running mock upstream. The server task runs until the test
/// process exits; tests bind a fresh instance each so nothing is shared.
pub struct MockUpstream {
    base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn respond(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.requests.lock().expect("request log poisoned").push(body);
    (state.status, Json(state.body.clone()))
}

/// Start a mock upstream that answers every `POST /responses` with the
/// given status and body.
pub async fn spawn_upstream(status: u16, body: Value) -> MockUpstream {
    let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).expect("invalid mock status code"),
        body,
        requests: Arc::clone(&requests),
    };

    let app = Router::new()
        .route("/responses", post(respond))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock upstream");
    let addr: SocketAddr = listener.local_addr().expect("mock upstream has no addr");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock upstream exited");
    });

    MockUpstream {
        base_url: format!("http://{addr}"),
        requests,
    }
}

impl MockUpstream {
    /// API root to point the client under test at.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All request bodies received so far, oldest first.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// The most recent request body, if any.
    pub fn last_request(&self) -> Option<Value> {
        self.requests().into_iter().last()
    }
}

/// Wrap a plan JSON value in a Responses-API reply: one reasoning item
/// (which extraction must skip) followed by a message with the plan as
/// `output_text`.
pub fn plan_reply(plan: &Value) -> Value {
    json!({
        "id": "resp_test",
        "output": [
            {"type": "reasoning", "summary": []},
            {"type": "message", "role": "assistant", "content": [
                {"type": "output_text", "text": plan.to_string()}
            ]}
        ]
    })
}

/// A structurally valid study plan whose blocks carry the given minutes.
/// Block types alternate Focus/Break; the quiz has three items.
pub fn sample_plan(minutes: &[u32]) -> Value {
    let blocks: Vec<Value> = minutes
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let kind = if i % 2 == 0 { "Focus" } else { "Break" };
            json!({"type": kind, "minutes": m, "description": format!("block {i}")})
        })
        .collect();

    json!({
        "topics": ["Light reactions", "Calvin cycle"],
        "plan": {"blocks": blocks},
        "quiz": [
            {"question": "Where do light reactions occur?",
             "choices": ["Stroma", "Thylakoid", "Cytosol", "Nucleus"],
             "correctIndex": 1},
            {"question": "What does the Calvin cycle fix?",
             "choices": ["O2", "N2", "CO2", "H2O"],
             "correctIndex": 2},
            {"question": "Main product of photosynthesis?",
             "choices": ["Glucose", "ATP only", "Protein", "Lipids"],
             "correctIndex": 0}
        ]
    })
}
