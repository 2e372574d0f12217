//! Prompt construction for plan generation.
//!
//! Builds the system instructions for the completion API from the session
//! parameters. Pure string assembly, no I/O; the study material itself is
//! sent as a separate user message, never embedded here.

use crate::session::SessionParams;

/// Planning rules included in every prompt.
const PLANNING_RULES: &str = "## Rules

1. The minutes of all blocks MUST sum to the requested duration exactly. \
Do not round, pad, or leave minutes unaccounted for.
2. Low energy (1-2): prefer shorter Focus blocks and more Break blocks.
3. High energy (4-5): prefer longer Focus blocks and more Practice blocks.
4. The quiz must cover the key concepts of the material.
5. Keep every block description short, one sentence at most.
";

/// Build the system prompt for a session.
///
/// The prompt carries the duration, energy level, and study type; the
/// output shape itself is enforced separately by the structured-output
/// schema, so the prompt only states the semantic rules.
pub fn build_system_prompt(params: &SessionParams) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a study session planner. The user will send study material. \
         Produce a study plan with timed blocks and a quiz for that material.\n\n",
    );

    prompt.push_str("## Session Parameters\n\n");
    prompt.push_str(&format!(
        "- **Duration:** {} minutes\n",
        params.duration_minutes
    ));
    prompt.push_str(&format!(
        "- **Energy level:** {} (scale 1-5)\n",
        params.energy_level
    ));
    prompt.push_str(&format!("- **Study type:** {}\n\n", params.study_type));

    prompt.push_str(PLANNING_RULES);

    prompt
}
