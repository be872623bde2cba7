/// Core error type for the homework bot.
///
/// Adapter crates map their transport errors into this type so the notifier
/// loop can turn any failure into a single user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("отсутствуют обязательные переменные окружения: {}", .0.join(", "))]
    ConfigMissing(Vec<&'static str>),

    #[error("ошибка конфигурации: {0}")]
    Config(String),

    #[error("ошибка при запросе к {endpoint} с параметрами {params}: {reason}")]
    Connection {
        endpoint: String,
        params: String,
        reason: String,
    },

    #[error("эндпоинт {url} недоступен, код ответа: {status}")]
    RemoteUnavailable { url: String, status: u16 },

    #[error("неверный тип значения {what}: ожидался {expected}, получен {found}")]
    TypeMismatch {
        what: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("отсутствует ключ `{0}` в ответе API")]
    MissingField(&'static str),

    #[error("неизвестный статус домашней работы `{0}`")]
    UnknownStatus(String),

    #[error("ошибка разбора JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ошибка отправки сообщения: {0}")]
    Notification(String),

    #[error("внешняя ошибка: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
