use crate::api::models::GameRecord;
use crate::api::parsers;
use crate::config::settings::LichessSettings;
use crate::http::RateLimitedClient;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;

const NDJSON: &str = "application/x-ndjson";

/// Lichess client for profile pages and the game export API
pub struct LichessClient {
    client: RateLimitedClient,
    base_url: String,
    nickname_regex: Regex,
}

impl LichessClient {
    pub fn new(settings: &LichessSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            nickname_regex: Self::compile_regex()?,
        })
    }

    /// Fetch the HTML profile page; `None` when Lichess does not answer 200
    pub async fn fetch_profile_page(&mut self, nickname: &str) -> Result<Option<String>> {
        self.validate_nickname(nickname)?;
        let url = self.build_profile_url(nickname);
        debug!("Fetching profile {}", url);

        let response = self.client.get(&url).await?;
        if !response.status().is_success() {
            warn!("Profile {} returned status {}", nickname, response.status());
            return Ok(None);
        }

        let html = response.text().await.context("Failed to read profile page body")?;
        Ok(Some(html))
    }

    /// Fetch the most recent finished game of a player
    pub async fn fetch_last_game(&mut self, nickname: &str) -> Result<GameRecord> {
        self.validate_nickname(nickname)?;
        let url = self.build_last_game_url(nickname);
        info!("Fetching last game of {}", nickname);

        let response = self.client.get_accepting(&url, NDJSON).await?;
        if !response.status().is_success() {
            anyhow::bail!("Game export for {} returned status: {}", nickname, response.status());
        }

        let body = response.text().await.context("Failed to read game export body")?;
        parsers::parse_first_game(&body)
            .with_context(|| format!("Failed to read last game of {}", nickname))
    }

    // --- Helper Methods ---

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,29}$")
            .context("Failed to compile nickname regex")
    }

    fn validate_nickname(&self, nickname: &str) -> Result<()> {
        if !self.nickname_regex.is_match(nickname) {
            anyhow::bail!("'{}' is not a valid Lichess username", nickname);
        }
        Ok(())
    }

    fn build_profile_url(&self, nickname: &str) -> String {
        format!("{}/@/{}", self.base_url, urlencoding::encode(nickname))
    }

    fn build_last_game_url(&self, nickname: &str) -> String {
        format!(
            "{}/api/games/user/{}?max=1&moves=true",
            self.base_url,
            urlencoding::encode(nickname)
        )
    }
}
