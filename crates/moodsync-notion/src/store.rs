//! Blocking client for the Notion-style target store.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::debug;

use moodsync_core::TargetStore;
use moodsync_model::{QueryPage, SchemaMap, StoreError};

use crate::parse::{parse_query_response, parse_schema_response};

const DEFAULT_API_BASE: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Target store client. One instance per run; every call blocks.
pub struct StoreClient {
    agent: ureq::Agent,
    api_base: String,
    api_key: String,
    database_id: String,
}

impl StoreClient {
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .timeout_global(Some(REQUEST_TIMEOUT))
                .build(),
        );
        Self {
            agent,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            database_id: database_id.into(),
        }
    }

    /// Override the API endpoint (test servers).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl TargetStore for StoreClient {
    fn fetch_schema(&self) -> Result<SchemaMap, StoreError> {
        let url = format!("{}/v1/databases/{}", self.api_base, self.database_id);
        let mut response = self
            .agent
            .get(url.as_str())
            .header("Authorization", self.bearer())
            .header("Notion-Version", NOTION_VERSION)
            .call()
            .map_err(map_store_error)?;
        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|error| StoreError::Malformed(error.to_string()))?;
        parse_schema_response(&body)
    }

    fn query_page(&self, page_size: u32, cursor: Option<&str>) -> Result<QueryPage, StoreError> {
        let url = format!("{}/v1/databases/{}/query", self.api_base, self.database_id);
        let mut body = json!({ "page_size": page_size });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        debug!(page_size, cursor = cursor.unwrap_or("<start>"), "query page");
        let mut response = self
            .agent
            .post(url.as_str())
            .header("Authorization", self.bearer())
            .header("Notion-Version", NOTION_VERSION)
            .send_json(&body)
            .map_err(map_store_error)?;
        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|error| StoreError::Malformed(error.to_string()))?;
        parse_query_response(&body)
    }

    fn create_entry(&self, properties: &Value) -> Result<(), StoreError> {
        let url = format!("{}/v1/pages", self.api_base);
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
        });
        self.agent
            .post(url.as_str())
            .header("Authorization", self.bearer())
            .header("Notion-Version", NOTION_VERSION)
            .send_json(&body)
            .map_err(map_store_error)?;
        Ok(())
    }
}

fn map_store_error(error: ureq::Error) -> StoreError {
    match error {
        ureq::Error::StatusCode(status) => StoreError::Api {
            status,
            message: "request rejected".to_string(),
        },
        other => StoreError::Transport(other.to_string()),
    }
}
