//! Plugin options.
use anyhow::{Context as _, Result as AnyResult};
use serde::Deserialize;

/// Options accepted by the color alpha plugin.
///
/// No option changes the output yet. Unknown keys are ignored, so an options
/// object shared with other tools loads unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {}

impl Options {
    /// Load options from a JSON object; blank input gives the defaults.
    ///
    /// # Errors
    /// Returns an error if `json` is not valid JSON or not an object.
    pub fn from_json(json: &str) -> AnyResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).context("invalid color-alpha options")
    }
}
