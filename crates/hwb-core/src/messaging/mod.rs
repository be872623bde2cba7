//! Outbound chat abstraction (Telegram today).

pub mod port;
