//! End-to-end pipeline tests against a mock upstream.

use serde_json::json;

use cram_core::openai::{OpenAiClient, OpenAiError};
use cram_core::plan::{BlockType, PlanValidationError};
use cram_core::service::{PlanSessionError, plan_session};
use cram_core::session::SessionParams;
use cram_test_utils::{MockUpstream, plan_reply, sample_plan, spawn_upstream};

fn params(duration: f64) -> SessionParams {
    SessionParams {
        material_text: "Photosynthesis basics".to_string(),
        duration_minutes: duration,
        energy_level: 2.0,
        study_type: "reading".to_string(),
    }
}

fn client_for(upstream: &MockUpstream) -> OpenAiClient {
    OpenAiClient::new("test-key", "gpt-4o-mini")
        .expect("client should build")
        .with_base_url(upstream.base_url())
}

#[tokio::test]
async fn returns_plan_when_minutes_sum_matches() {
    let upstream = spawn_upstream(200, plan_reply(&sample_plan(&[10, 5, 15]))).await;
    let client = client_for(&upstream);

    let plan = plan_session(&client, &params(30.0)).await.unwrap();

    assert_eq!(plan.plan.blocks.len(), 3);
    assert_eq!(plan.plan.blocks[0].kind, BlockType::Focus);
    assert_eq!(plan.plan.blocks[1].kind, BlockType::Break);
    assert_eq!(plan.quiz.len(), 3);

    // Field-for-field passthrough of the upstream plan.
    let returned = serde_json::to_value(&plan).unwrap();
    assert_eq!(returned, sample_plan(&[10, 5, 15]));
}

#[tokio::test]
async fn rejects_plan_whose_minutes_do_not_sum() {
    let upstream = spawn_upstream(200, plan_reply(&sample_plan(&[10, 5, 10]))).await;
    let client = client_for(&upstream);

    let err = plan_session(&client, &params(30.0)).await.unwrap_err();
    match err {
        PlanSessionError::Invalid(PlanValidationError::MinutesMismatch { requested, actual }) => {
            assert_eq!(requested, 30.0);
            assert_eq!(actual, 25);
        }
        other => panic!("expected minutes mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn surfaces_upstream_error_with_raw_body() {
    let upstream = spawn_upstream(
        429,
        json!({"error": {"message": "Rate limit reached", "type": "rate_limit_error"}}),
    )
    .await;
    let client = client_for(&upstream);

    let err = plan_session(&client, &params(30.0)).await.unwrap_err();
    match err {
        PlanSessionError::Upstream(OpenAiError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("Rate limit reached"), "raw body kept: {body}");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn reply_without_output_text_is_no_structured_output() {
    let upstream = spawn_upstream(
        200,
        json!({"id": "resp_1", "output": [{"type": "reasoning", "summary": []}]}),
    )
    .await;
    let client = client_for(&upstream);

    let err = plan_session(&client, &params(30.0)).await.unwrap_err();
    assert!(matches!(
        err,
        PlanSessionError::Upstream(OpenAiError::NoStructuredOutput)
    ));
}

#[tokio::test]
async fn undecodable_output_text_is_a_decode_error() {
    let upstream = spawn_upstream(
        200,
        json!({"output": [{"type": "message", "content": [
            {"type": "output_text", "text": "not a plan"}
        ]}]}),
    )
    .await;
    let client = client_for(&upstream);

    let err = plan_session(&client, &params(30.0)).await.unwrap_err();
    assert!(matches!(err, PlanSessionError::Decode(_)));
}

#[tokio::test]
async fn outbound_request_carries_messages_and_schema() {
    let upstream = spawn_upstream(200, plan_reply(&sample_plan(&[10, 5, 15]))).await;
    let client = client_for(&upstream);

    plan_session(&client, &params(30.0)).await.unwrap();

    let sent = upstream.last_request().expect("upstream saw one request");
    assert_eq!(sent["model"], json!("gpt-4o-mini"));

    let input = sent["input"].as_array().expect("input is an array");
    assert_eq!(input.len(), 2);
    assert_eq!(input[0]["role"], json!("system"));
    assert_eq!(input[1]["role"], json!("user"));
    assert_eq!(input[1]["content"], json!("Photosynthesis basics"));

    // Prompt carries the session parameters; material stays out of it.
    let system = input[0]["content"].as_str().unwrap();
    assert!(system.contains("30 minutes"));
    assert!(!system.contains("Photosynthesis"));

    assert_eq!(sent["text"]["format"]["type"], json!("json_schema"));
    assert_eq!(sent["text"]["format"]["strict"], json!(true));
    assert_eq!(
        sent["text"]["format"]["schema"]["required"],
        json!(["topics", "plan", "quiz"])
    );
}
