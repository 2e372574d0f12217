//! The `cram generate` command: one-shot plan generation from a file.
//!
//! Reads study material from disk, runs the same pipeline the HTTP
//! endpoint uses, and prints the plan JSON to stdout.

use anyhow::{Context, Result};

use cram_core::openai::OpenAiClient;
use cram_core::service::plan_session;
use cram_core::session::{SessionParams, SessionRequest};

/// Read the material file and assemble validated session parameters.
fn params_from_file(
    file: &str,
    duration: f64,
    energy: f64,
    study_type: &str,
) -> Result<SessionParams> {
    let material = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read material file {file}"))?;

    let request = SessionRequest {
        material_text: Some(material),
        duration_minutes: Some(duration),
        energy_level: Some(energy),
        study_type: Some(study_type.to_string()),
    };
    request
        .validate()
        .with_context(|| format!("incomplete session parameters (is {file} empty?)"))
}

pub async fn run_generate(
    client: &OpenAiClient,
    file: &str,
    duration: f64,
    energy: f64,
    study_type: &str,
) -> Result<()> {
    let params = params_from_file(file, duration, energy, study_type)?;

    let plan = plan_session(client, &params)
        .await
        .context("plan generation failed")?;

    let rendered = serde_json::to_string_pretty(&plan).context("failed to render plan JSON")?;
    println!("{rendered}");
    Ok(())
}
