use std::fmt;

/// Where notifications go: a numeric Telegram chat or a public `@channel`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatTarget {
    Id(i64),
    Channel(String),
}

impl ChatTarget {
    /// Parse the raw `TELEGRAM_CHAT_ID` value. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(ChatTarget::Id(id));
        }
        let name = raw.strip_prefix('@').unwrap_or(raw);
        if name.is_empty() {
            return None;
        }
        Some(ChatTarget::Channel(format!("@{name}")))
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{id}"),
            ChatTarget::Channel(name) => f.write_str(name),
        }
    }
}

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// Lower bound for the status records to fetch, in Unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusQuery {
    pub from_date: i64,
}
