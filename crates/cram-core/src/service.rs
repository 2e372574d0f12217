//! Plan generation pipeline.
//!
//! Strictly linear with early exit at each gate: build the prompt, make one
//! upstream call, extract the structured text, decode it, check the minutes
//! invariant. No retries, no recovery; every failure is terminal for the
//! request and carries enough detail to distinguish the failure point.

use thiserror::Error;

use crate::openai::{OpenAiClient, OpenAiError};
use crate::plan::{PlanValidationError, StudyPlan, validate_block_minutes};
use crate::prompt::build_system_prompt;
use crate::session::SessionParams;

/// Errors from running the full pipeline.
#[derive(Debug, Error)]
pub enum PlanSessionError {
    /// The upstream call failed (transport, non-success status, or a reply
    /// without structured output).
    #[error(transparent)]
    Upstream(#[from] OpenAiError),

    /// The extracted text did not decode as a study plan.
    #[error("failed to decode generated plan: {0}")]
    Decode(#[from] serde_json::Error),

    /// The decoded plan violated the duration invariant.
    #[error(transparent)]
    Invalid(#[from] PlanValidationError),
}

/// Generate and validate a study plan for one session.
///
/// The returned plan is exactly what the model produced; a plan that fails
/// the minutes check is discarded, never corrected.
pub async fn plan_session(
    client: &OpenAiClient,
    params: &SessionParams,
) -> Result<StudyPlan, PlanSessionError> {
    let prompt = build_system_prompt(params);
    let text = client.generate_plan(&prompt, &params.material_text).await?;

    let plan: StudyPlan = serde_json::from_str(&text)?;
    validate_block_minutes(&plan, params.duration_minutes)?;

    tracing::info!(
        blocks = plan.plan.blocks.len(),
        quiz_items = plan.quiz.len(),
        duration = params.duration_minutes,
        "generated study plan"
    );

    Ok(plan)
}
