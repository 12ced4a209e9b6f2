use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::richtext::StyledText;

/// Persisted chat message. The rich-text body is stored as its HTML string
/// form; everything else is plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,

    #[serde(with = "crate::richtext::html", default)]
    pub content: StyledText,

    pub account_id: String,
    pub account_name: String,

    pub from_me: bool,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub mentions: Vec<Mention>,
}

/// Account referenced by an '@' mention inside a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: String,
    pub username: String,
    pub url: Option<String>,
}

/// Message accessor implemented by the storage layer: `insert` ignores a
/// message whose id is already present, `load_all` returns messages in
/// ascending `created_at` order.
pub trait MessageStore {
    fn insert(&mut self, message: Message);
    fn load_all(&self) -> Vec<Message>;
}
