use std::{env, fmt, fs, path::Path, time::Duration};

use crate::{domain::ChatTarget, errors::Error, Result};

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);

/// Typed configuration, resolved once at startup and passed into the loop.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat: ChatTarget,
    pub endpoint: String,
    pub retry_period: Duration,
}

impl Config {
    /// Load `.env` (if present) and resolve the config from the process environment.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the config from an arbitrary key lookup.
    ///
    /// Every missing required value is reported at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let practicum_token = get(PRACTICUM_TOKEN);
        let telegram_token = get(TELEGRAM_TOKEN);
        let chat_raw = get(TELEGRAM_CHAT_ID);

        let mut missing = Vec::new();
        if practicum_token.is_none() {
            missing.push(PRACTICUM_TOKEN);
        }
        if telegram_token.is_none() {
            missing.push(TELEGRAM_TOKEN);
        }
        if chat_raw.is_none() {
            missing.push(TELEGRAM_CHAT_ID);
        }

        let (Some(practicum_token), Some(telegram_token), Some(chat_raw)) =
            (practicum_token, telegram_token, chat_raw)
        else {
            return Err(Error::ConfigMissing(missing));
        };

        let chat = ChatTarget::parse(&chat_raw).ok_or_else(|| {
            Error::Config(format!(
                "{TELEGRAM_CHAT_ID} должен быть числовым id чата или @username, получено `{chat_raw}`"
            ))
        })?;

        let endpoint = get("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_period = match get("RETRY_PERIOD_SECS") {
            None => DEFAULT_RETRY_PERIOD,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "RETRY_PERIOD_SECS должен быть положительным числом секунд, получено `{raw}`"
                    )))
                }
            },
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            chat,
            endpoint,
            retry_period,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat", &self.chat)
            .field("endpoint", &self.endpoint)
            .field("retry_period", &self.retry_period)
            .finish()
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, unquote(v.trim()));
    }
}

fn unquote(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        &val[1..val.len() - 1]
    } else {
        val
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
