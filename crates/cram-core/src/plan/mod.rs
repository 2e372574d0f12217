//! Study plan types, the structured-output schema, and post-hoc validation.

pub mod schema;
pub mod types;
pub mod validate;

pub use types::{Block, BlockType, PlanBlocks, QuizItem, StudyPlan};
pub use validate::{PlanValidationError, validate_block_minutes};
