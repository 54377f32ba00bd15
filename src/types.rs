use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[[[hour padding:zero]:[minute padding:zero]:[second padding:zero]]");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
    Error,
    Pending,
}

impl Origin {
    pub fn prefix(self) -> &'static str {
        match self {
            Origin::User => ">",
            _ => "[SYSTEM]:",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Origin::User => "user-message",
            Origin::System => "system-message",
            Origin::Error => "error-message",
            Origin::Pending => "loading-message",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub origin: Origin,
    pub text: String,
    pub created_at: OffsetDateTime,
    /// Set while a reveal is still appending to this message.
    pub typing: bool,
}

impl ChatMessage {
    pub fn new(id: MessageId, origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id,
            origin,
            text: text.into(),
            created_at: OffsetDateTime::now_utc(),
            typing: false,
        }
    }

    /// `[HH:MM:SS]` in local time when the offset is known, UTC otherwise.
    pub fn timestamp(&self) -> String {
        format_timestamp(self.created_at)
    }
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let mut datetime = at;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "[--:--:--]".to_string())
}

/// Query accepted by the proxy endpoint.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the proxy on every failure path.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
