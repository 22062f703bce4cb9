use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct LichessSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for LichessSettings {
    fn default() -> Self {
        Self {
            base_url: "https://lichess.org".to_string(),
            user_agent: "LichessRatingBot/0.1",
            timeout_secs: 30,
            rate_limit_ms: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub api_base_url: String,
    pub token: Option<String>,
    pub poll_timeout_secs: u64,
    // must exceed the long-poll timeout
    pub timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.telegram.org".to_string(),
            token: None,
            poll_timeout_secs: 25,
            timeout_secs: 60,
        }
    }
}

impl TelegramSettings {
    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref() {
            Some(token) => Ok(token),
            None => anyhow::bail!("CHESSTOKEN is not set; the bot cannot log in"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "chess_rating.db".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ttl_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { ttl_secs: 600 }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub window_days: i64,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            window_days: 30,
            width: 800,
            height: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub lichess: LichessSettings,
    pub telegram: TelegramSettings,
    pub storage: StorageSettings,
    pub session: SessionSettings,
    pub chart: ChartSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            lichess: LichessSettings::default(),
            telegram: TelegramSettings::default(),
            storage: StorageSettings::default(),
            session: SessionSettings::default(),
            chart: ChartSettings::default(),
        }
    }

    /// Defaults overridden by `.env` and the process environment
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::new();
        config.telegram.token = read_var("CHESSTOKEN");
        if let Some(path) = read_var("DATABASE_PATH") {
            config.storage.database_path = path;
        }
        if let Some(url) = read_var("LICHESS_BASE_URL") {
            config.lichess.base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
