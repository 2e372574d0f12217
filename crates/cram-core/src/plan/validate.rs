//! Post-generation validation.
//!
//! The structured-output schema constrains shape; this module checks the
//! one numeric invariant the schema cannot express: block minutes must sum
//! to the requested session duration exactly. A plan that fails is
//! discarded, never corrected.

use thiserror::Error;

use super::types::StudyPlan;

/// Errors from validating a generated plan.
#[derive(Debug, Error)]
pub enum PlanValidationError {
    #[error("plan minutes {actual} do not sum to requested duration {requested}")]
    MinutesMismatch { requested: f64, actual: u64 },
}

/// Check that the plan's block minutes sum exactly to the requested duration.
pub fn validate_block_minutes(
    plan: &StudyPlan,
    requested_minutes: f64,
) -> Result<(), PlanValidationError> {
    let actual: u64 = plan.plan.blocks.iter().map(|b| u64::from(b.minutes)).sum();
    if actual as f64 != requested_minutes {
        return Err(PlanValidationError::MinutesMismatch {
            requested: requested_minutes,
            actual,
        });
    }
    Ok(())
}
