use serde::{Deserialize, Serialize};

// --- Bot API envelopes ---

/// Every Bot API method answers with this wrapper
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

// --- Outgoing payloads ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// One button per row
    pub fn single_column(buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        Self {
            inline_keyboard: buttons.into_iter().map(|button| vec![button]).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<&'a InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackRequest<'a> {
    pub callback_query_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_update_deserializes() {
        let json = r#"{
            "update_id": 42,
            "callback_query": {
                "id": "4382",
                "from": {"id": 7, "is_bot": false, "first_name": "Ivan"},
                "message": {"message_id": 11, "date": 0, "chat": {"id": -100, "type": "group"}},
                "chat_instance": "abc",
                "data": "select_player_Viposha"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let callback = update.callback_query.unwrap();

        assert!(update.message.is_none());
        assert_eq!(callback.from.id, 7);
        assert_eq!(callback.message.unwrap().chat.id, -100);
        assert_eq!(callback.data.as_deref(), Some("select_player_Viposha"));
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();

        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_send_message_skips_empty_fields() {
        let request = SendMessageRequest {
            chat_id: 1,
            text: "hi",
            reply_markup: None,
            reply_to_message_id: None,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"chat_id":1,"text":"hi"}"#
        );
    }
}
