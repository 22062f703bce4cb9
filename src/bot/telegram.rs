use anyhow::{Context, Result};
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::bot::models::{
    AnswerCallbackRequest, ApiResponse, GetUpdatesRequest, InlineKeyboardMarkup,
    SendMessageRequest, Update, User,
};
use crate::config::settings::TelegramSettings;
use crate::errors::TelegramError;
use crate::http::build_client;

const USER_AGENT: &str = "LichessRatingBot/0.1";
const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// Minimal Telegram Bot API client (long polling)
pub struct TelegramClient {
    client: Client,
    // contains the token; errors are stripped of URLs before logging
    endpoint: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    pub fn new(settings: &TelegramSettings) -> Result<Self> {
        let token = settings.require_token()?;
        let client = build_client(USER_AGENT, settings.timeout_secs)?;

        Ok(Self {
            client,
            endpoint: format!("{}/bot{}", settings.api_base_url, token),
            poll_timeout_secs: settings.poll_timeout_secs,
        })
    }

    /// Identity of the bot behind the token
    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates newer than `offset`
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: &ALLOWED_UPDATES,
        };
        self.call("getUpdates", &request).await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
        reply_to: Option<i64>,
    ) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: keyboard,
            reply_to_message_id: reply_to,
        };
        self.call::<Value>("sendMessage", &request).await.map(|_| ())
    }

    /// Upload a PNG as a photo message
    pub async fn send_photo(&self, chat_id: i64, png: Vec<u8>, caption: &str) -> Result<()> {
        let photo = Part::bytes(png)
            .file_name("rating.png")
            .mime_str("image/png")
            .context("Failed to build photo upload")?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", photo);

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to call Telegram method sendPhoto")?;

        let body: ApiResponse<Value> = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to decode Telegram sendPhoto response")?;
        unwrap_response("sendPhoto", body).map(|_| ())
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        let request = AnswerCallbackRequest { callback_query_id };
        self.call::<Value>("answerCallbackQuery", &request).await.map(|_| ())
    }

    // --- Helper Methods ---

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &impl Serialize) -> Result<T> {
        debug!("Calling Telegram method {}", method);

        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to call Telegram method {}", method))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to decode Telegram {} response", method))?;
        unwrap_response(method, envelope)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.endpoint, method)
    }
}

fn unwrap_response<T>(method: &str, response: ApiResponse<T>) -> Result<T> {
    match (response.ok, response.result) {
        (true, Some(result)) => Ok(result),
        (_, _) => Err(TelegramError {
            method: method.to_string(),
            description: response
                .description
                .unwrap_or_else(|| "no result in response".to_string()),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TelegramSettings {
        TelegramSettings {
            token: Some("123:abc".to_string()),
            ..TelegramSettings::default()
        }
    }

    #[test]
    fn test_method_url_embeds_token() {
        let client = TelegramClient::new(&settings()).unwrap();
        assert_eq!(
            client.method_url("getUpdates"),
            "https://api.telegram.org/bot123:abc/getUpdates"
        );
    }

    #[test]
    fn test_client_requires_token() {
        assert!(TelegramClient::new(&TelegramSettings::default()).is_err());
    }

    #[test]
    fn test_unwrap_response() {
        let ok = ApiResponse { ok: true, result: Some(5), description: None };
        assert_eq!(unwrap_response("getMe", ok).unwrap(), 5);

        let failed: ApiResponse<i32> = ApiResponse {
            ok: false,
            result: None,
            description: Some("Bad Request: chat not found".to_string()),
        };
        let err = unwrap_response("sendMessage", failed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Telegram method sendMessage failed: Bad Request: chat not found"
        );
    }
}
