use anyhow::Result;
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::time::sleep;

use crate::bot::handlers::{self, BotContext};
use crate::bot::models::{CallbackQuery, Message, Update};
use crate::bot::{CallbackAction, Command, Reply, TelegramClient};
use crate::config::settings::AppConfig;
use crate::errors::FlowError;

const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);
const FAILURE_TEXT: &str = "Something went wrong, please try again.";

/// Long-polling loop feeding Telegram updates to the handlers one at a time
pub struct BotService {
    telegram: TelegramClient,
    context: BotContext,
    // commands addressed to another bot (`/cmd@Other`) are ignored once known
    username: Option<String>,
}

impl BotService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let telegram = TelegramClient::new(&config.telegram)?;
        let context = BotContext::new(config)?;
        Ok(Self {
            telegram,
            context,
            username: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        match self.telegram.get_me().await {
            Ok(me) => self.username = me.username,
            Err(e) => warn!("Could not look up bot identity: {:#}", e),
        }

        info!(
            "Bot @{} started, waiting for updates",
            self.username.as_deref().unwrap_or("?")
        );
        let mut offset = None;

        loop {
            let polled = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested, stopping bot");
                    return Ok(());
                }
                polled = self.telegram.get_updates(offset) => polled,
            };

            let updates = match polled {
                Ok(updates) => updates,
                Err(e) => {
                    warn!("Polling failed: {:#}", e);
                    sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = Some(update.update_id + 1);
                self.process(update).await;
            }
        }
    }

    // --- Dispatch ---

    async fn process(&mut self, update: Update) {
        if let Some(message) = update.message {
            self.process_message(message).await;
        } else if let Some(callback) = update.callback_query {
            self.process_callback(callback).await;
        }
    }

    async fn process_message(&mut self, message: Message) {
        let own = self.username.as_deref();
        let Some(command) = message.text.as_deref().and_then(|text| Command::parse(text, own)) else {
            return;
        };
        let chat_id = message.chat.id;
        debug!("Command {:?} in chat {}", command, chat_id);

        let result = handlers::handle_command(&mut self.context, command, &message).await;
        self.finish(chat_id, result).await;
    }

    async fn process_callback(&mut self, callback: CallbackQuery) {
        if let Err(e) = self.telegram.answer_callback_query(&callback.id).await {
            warn!("Failed to answer callback {}: {:#}", callback.id, e);
        }

        let Some(chat_id) = callback.message.as_ref().map(|m| m.chat.id) else {
            warn!("Callback {} has no message to reply to", callback.id);
            return;
        };

        let action = match CallbackAction::parse(callback.data.as_deref().unwrap_or_default()) {
            Ok(action) => action,
            Err(e) => {
                warn!("Rejected callback from user {}: {}", callback.from.id, e);
                self.finish(chat_id, Ok(rejection_reply(&e))).await;
                return;
            }
        };

        let result = handlers::handle_callback(&mut self.context, action, callback.from.id).await;
        self.finish(chat_id, result).await;
    }

    // --- Delivery ---

    async fn finish(&self, chat_id: i64, result: Result<Reply>) {
        let reply = reply_for(chat_id, result);
        if let Err(e) = self.deliver(chat_id, reply).await {
            error!("Failed to deliver reply to chat {}: {:#}", chat_id, e);
        }
    }

    async fn deliver(&self, chat_id: i64, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text {
                text,
                keyboard,
                reply_to,
            } => {
                self.telegram
                    .send_message(chat_id, &text, keyboard.as_ref(), reply_to)
                    .await
            }
            Reply::Photo { png, caption } => self.telegram.send_photo(chat_id, png, &caption).await,
        }
    }
}

/// What the chat sees for a handler outcome; failures are logged and replaced
fn reply_for(chat_id: i64, result: Result<Reply>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(e) => {
            error!("Interaction in chat {} failed: {:#}", chat_id, e);
            Reply::text(FAILURE_TEXT)
        }
    }
}

fn rejection_reply(e: &FlowError) -> Reply {
    Reply::text(format!("Error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ratings::tests::{test_config, LAST_GAMES};
    use anyhow::anyhow;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123:abc";
    const CHAT: i64 = -100;

    fn bot_path(method_name: &str) -> String {
        format!("/bot{}/{}", TOKEN, method_name)
    }

    fn sent() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"message_id": 1}}))
    }

    async fn expect_answer(telegram: &MockServer) {
        Mock::given(method("POST"))
            .and(path(bot_path("answerCallbackQuery")))
            .and(body_partial_json(json!({"callback_query_id": "cb1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": true})))
            .expect(1)
            .mount(telegram)
            .await;
    }

    async fn expect_text(telegram: &MockServer, text: &str) {
        Mock::given(method("POST"))
            .and(path(bot_path("sendMessage")))
            .and(body_partial_json(json!({"chat_id": CHAT, "text": text})))
            .respond_with(sent())
            .expect(1)
            .mount(telegram)
            .await;
    }

    fn service(name: &str, telegram: &MockServer, lichess: Option<&MockServer>) -> BotService {
        let mut config = test_config(name);
        config.telegram.api_base_url = telegram.uri();
        config.telegram.token = Some(TOKEN.to_string());
        if let Some(lichess) = lichess {
            config.lichess.base_url = lichess.uri();
        }
        BotService::new(config).unwrap()
    }

    fn callback(data: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 1,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 7},
                "message": {"message_id": 11, "chat": {"id": CHAT}},
                "data": data
            }
        }))
        .unwrap()
    }

    fn command(text: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 2,
            "message": {"message_id": 12, "chat": {"id": CHAT}, "from": {"id": 7}, "text": text}
        }))
        .unwrap()
    }

    #[test]
    fn test_failed_interaction_gets_generic_text() {
        let reply = reply_for(CHAT, Err(anyhow!("Game export for Viposha returned status: 500")));
        assert_eq!(reply.as_text(), Some(FAILURE_TEXT));
        assert_eq!(FAILURE_TEXT, "Something went wrong, please try again.");

        let reply = reply_for(CHAT, Ok(Reply::text("fine")));
        assert_eq!(reply.as_text(), Some("fine"));
    }

    #[test]
    fn test_rejected_payload_text() {
        let reply = rejection_reply(&FlowError::UnknownCallback("bogus".to_string()));
        assert_eq!(reply.as_text(), Some("Error: unrecognised callback payload 'bogus'"));
    }

    #[tokio::test]
    async fn test_unknown_callback_is_answered_and_rejected() {
        let telegram = MockServer::start().await;
        expect_answer(&telegram).await;
        expect_text(&telegram, "Error: unrecognised callback payload 'bogus'").await;

        let mut bot = service("bot_rejected", &telegram, None);
        bot.process(callback("bogus")).await;
    }

    #[tokio::test]
    async fn test_last_game_callback_sends_summary() {
        let lichess = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/games/user/Viposha"))
            .and(header("accept", "application/x-ndjson"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LAST_GAMES))
            .expect(1)
            .mount(&lichess)
            .await;

        let telegram = MockServer::start().await;
        expect_answer(&telegram).await;
        expect_text(
            &telegram,
            "Viposha (1650) wins vs Pyrog_Ivan (1712) by checkmate in 2 moves in standard game. Time control blitz",
        )
        .await;

        let mut bot = service("bot_last", &telegram, Some(&lichess));
        bot.process(callback("last_player_Viposha")).await;
    }

    #[tokio::test]
    async fn test_failing_callback_sends_failure_text() {
        let lichess = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/games/user/Viposha"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&lichess)
            .await;

        let telegram = MockServer::start().await;
        expect_answer(&telegram).await;
        expect_text(&telegram, FAILURE_TEXT).await;

        let mut bot = service("bot_failure", &telegram, Some(&lichess));
        bot.process(callback("last_player_Viposha")).await;
    }

    #[tokio::test]
    async fn test_commands_for_other_bots_get_no_reply() {
        let telegram = MockServer::start().await;
        expect_text(&telegram, "Hello, chess boys!").await;

        let mut bot = service("bot_addressee", &telegram, None);
        bot.username = Some("RatingBot".to_string());
        bot.process(command("/start@OtherBot")).await;
        bot.process(command("/start@RatingBot")).await;
    }
}
