use crate::bot::models::InlineKeyboardMarkup;

/// What a handler wants sent back to the chat
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
        reply_to: Option<i64>,
    },
    Photo {
        png: Vec<u8>,
        caption: String,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            keyboard: None,
            reply_to: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self::Text {
            text: text.into(),
            keyboard: Some(keyboard),
            reply_to: None,
        }
    }

    pub fn photo(png: Vec<u8>, caption: impl Into<String>) -> Self {
        Self::Photo {
            png,
            caption: caption.into(),
        }
    }

    /// Thread the reply under the triggering message (text replies only)
    pub fn replying_to(self, message_id: i64) -> Self {
        match self {
            Self::Text { text, keyboard, .. } => Self::Text {
                text,
                keyboard,
                reply_to: Some(message_id),
            },
            photo => photo,
        }
    }

    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Photo { .. } => None,
        }
    }
}
