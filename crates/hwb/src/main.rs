use std::sync::Arc;

use hwb_core::{config::Config, notifier::Notifier};
use hwb_practicum::PracticumClient;
use hwb_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> Result<(), hwb_core::Error> {
    hwb_core::logging::init("hwb")?;
    let shutdown = hwb_core::shutdown::signal()?;

    let cfg = Config::load().inspect_err(|e| {
        tracing::error!(fatal = true, error = %e, "cannot start without configuration, exiting");
    })?;
    tracing::debug!(?cfg, "configuration loaded");

    let practicum = Arc::new(PracticumClient::new(
        cfg.practicum_token.clone(),
        cfg.endpoint.clone(),
    )?);
    tracing::info!(endpoint = practicum.endpoint(), "polling homework statuses");
    let telegram = TelegramMessenger::from_token(cfg.telegram_token.clone());

    match telegram.username().await {
        Ok(name) => tracing::info!("bot started: @{name}"),
        Err(e) => tracing::warn!(error = %e, "could not resolve bot username"),
    }

    let notifier = Notifier::new(practicum, Arc::new(telegram), cfg.chat.clone(), cfg.retry_period);
    notifier.run_until(shutdown).await;

    Ok(())
}
