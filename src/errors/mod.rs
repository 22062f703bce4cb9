use anyhow::Context as _;
use thiserror::Error;

/// Rejections raised while walking a guided chat flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Player name not found. Please start over by using /graph.")]
    MissingSelection,
    #[error("player '{0}' is not tracked")]
    UnknownPlayer(String),
    #[error("unknown rating type '{0}'")]
    UnknownCategory(String),
    #[error("unrecognised callback payload '{0}'")]
    UnknownCallback(String),
}

/// Telegram answered with `ok: false`
#[derive(Debug, Error)]
#[error("Telegram method {method} failed: {description}")]
pub struct TelegramError {
    pub method: String,
    pub description: String,
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to storage errors
pub fn storage_context(operation: &str, key: &str) -> String {
    format!("Failed to {} rating snapshot for: {}", operation, key)
}

/// Wrap result with fetch context
pub fn with_fetch_context<T, E>(result: Result<T, E>, url: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(fetch_context(url))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
