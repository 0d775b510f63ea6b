//! Title generation through a messages-style completion endpoint.
//!
//! The output constraints (letters and spaces, Russian or English, no full
//! stops, single header line) are delegated to the service via the prompt;
//! nothing is validated locally.

use std::fmt::Write as _;
use std::time::Duration;

use serde_json::{Value, json};

use moodsync_core::TitleGenerator;
use moodsync_model::{RawRow, TitleError};

const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Title generation client. Blocking, one call per non-duplicate record.
pub struct TitleClient {
    agent: ureq::Agent,
    api_base: String,
    api_key: String,
    model: String,
}

impl TitleClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_global(Some(REQUEST_TIMEOUT))
                .build(),
        );
        Self {
            agent,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the API endpoint (test servers).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Build the instruction prompt over the raw row.
///
/// The raw row, not the canonical record: the instructions reference the
/// source Notes phrasing. Missing cells are left out of the data block.
pub fn build_title_prompt(row: &RawRow) -> String {
    let mut data = String::new();
    for (column, value) in row.iter() {
        if value.is_missing() {
            continue;
        }
        let _ = writeln!(data, "{column}: {value}");
    }
    format!(
        "Your goal is to create a short name for an entry in the Mood diary.\n\
         You'll be provided data about the mood diary entry and you need to output only the name of that diary entry.\n\
         Pay special attention to the Notes field.\n\
         Include no other info except for the title.\n\
         Only spaces and letters: Russian or English. No full stops. Treat it as a header.\n\
         Data:\n{data}"
    )
}

/// Pull the title text out of a messages-endpoint response.
pub fn extract_title(value: &Value) -> Result<String, TitleError> {
    value
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| TitleError::Malformed("no text content in response".to_string()))
}

impl TitleGenerator for TitleClient {
    fn generate(&self, row: &RawRow) -> Result<String, TitleError> {
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "user", "content": build_title_prompt(row) }
            ],
        });
        let url = format!("{}/v1/messages", self.api_base);
        let mut response = self
            .agent
            .post(url.as_str())
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send_json(&body)
            .map_err(map_title_error)?;
        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|error| TitleError::Malformed(error.to_string()))?;
        extract_title(&body)
    }
}

fn map_title_error(error: ureq::Error) -> TitleError {
    match error {
        ureq::Error::StatusCode(status) => TitleError::Api {
            status,
            message: "request rejected".to_string(),
        },
        other => TitleError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodsync_model::{FieldValue, RowId};
    use std::collections::BTreeMap;

    fn row(cells: &[(&str, FieldValue)]) -> RawRow {
        let cells: BTreeMap<String, FieldValue> = cells
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();
        RawRow::new(RowId::from_first_16_bytes_of_sha256([1u8; 32]), cells)
    }

    #[test]
    fn prompt_includes_present_cells_and_skips_missing() {
        let prompt = build_title_prompt(&row(&[
            ("Notes", FieldValue::Text("long walk by the river".to_string())),
            ("Sleep", FieldValue::Missing),
            ("Steps", FieldValue::Number(10412.0)),
        ]));
        assert!(prompt.contains("Notes: long walk by the river"));
        assert!(prompt.contains("Steps: 10412"));
        assert!(!prompt.contains("Sleep"));
        assert!(prompt.contains("Pay special attention to the Notes field."));
    }

    #[test]
    fn title_is_extracted_and_trimmed() {
        let response = serde_json::json!({
            "content": [ { "type": "text", "text": "  Morning walk\n" } ]
        });
        assert_eq!(extract_title(&response).expect("title"), "Morning walk");
    }

    #[test]
    fn missing_content_is_malformed() {
        let response = serde_json::json!({ "content": [] });
        assert!(matches!(
            extract_title(&response),
            Err(TitleError::Malformed(_))
        ));
    }
}
