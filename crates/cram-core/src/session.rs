//! Session request parameters.
//!
//! [`SessionRequest`] mirrors the inbound JSON body field-for-field, with
//! every field optional so an incomplete body still deserializes and can be
//! rejected with a single "missing fields" outcome. [`SessionParams`] is the
//! validated form the rest of the pipeline works with.

use serde::Deserialize;
use thiserror::Error;

/// Raw inbound session request. All fields optional; see [`SessionRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(default)]
    pub material_text: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub energy_level: Option<f64>,
    #[serde(default)]
    pub study_type: Option<String>,
}

/// Validated session parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    pub material_text: String,
    pub duration_minutes: f64,
    pub energy_level: f64,
    pub study_type: String,
}

/// One or more required fields are absent or empty.
#[derive(Debug, Error)]
#[error("missing required session fields")]
pub struct MissingFields;

impl SessionRequest {
    /// Check that all four fields are present and non-empty.
    ///
    /// Presence and non-emptiness only: an empty string or a zero number is
    /// rejected, but no range check is applied to `duration_minutes` or
    /// `energy_level`. Out-of-range values flow into the prompt as given.
    pub fn validate(self) -> Result<SessionParams, MissingFields> {
        let material_text = self.material_text.filter(|s| !s.is_empty());
        let duration_minutes = self.duration_minutes.filter(|n| *n != 0.0);
        let energy_level = self.energy_level.filter(|n| *n != 0.0);
        let study_type = self.study_type.filter(|s| !s.is_empty());

        match (material_text, duration_minutes, energy_level, study_type) {
            (Some(material_text), Some(duration_minutes), Some(energy_level), Some(study_type)) => {
                Ok(SessionParams {
                    material_text,
                    duration_minutes,
                    energy_level,
                    study_type,
                })
            }
            _ => Err(MissingFields),
        }
    }
}
