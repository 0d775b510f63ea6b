//! Process configuration read once from the environment at startup.

use anyhow::{Context, Result};

pub const NOTION_API_KEY_VAR: &str = "NOTION_API_KEY";
pub const NOTION_DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";
pub const ANTHROPIC_KEY_VAR: &str = "ANTHROPIC_KEY";

/// Endpoint overrides, for pointing the clients at a test server.
pub const NOTION_API_URL_VAR: &str = "NOTION_API_URL";
pub const ANTHROPIC_API_URL_VAR: &str = "ANTHROPIC_API_URL";

/// Credentials for the target store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_key: String,
    pub database_id: String,
    pub api_url: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require(NOTION_API_KEY_VAR)?,
            database_id: require(NOTION_DATABASE_ID_VAR)?,
            api_url: optional(NOTION_API_URL_VAR),
        })
    }
}

/// Credentials for the title generation service.
#[derive(Debug, Clone)]
pub struct TitleConfig {
    pub api_key: String,
    pub api_url: Option<String>,
}

impl TitleConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require(ANTHROPIC_KEY_VAR)?,
            api_url: optional(ANTHROPIC_API_URL_VAR),
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("environment variable {name} is not set"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
