use std::future::Future;

use crate::{errors::Error, Result};

/// Register the shutdown signal handlers now and return a future that
/// resolves on the first SIGINT or SIGTERM.
///
/// Handlers are installed before this returns, so a signal that arrives while
/// startup or the first cycle is still running is not lost.
#[cfg(unix)]
pub fn signal() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let register = |kind: SignalKind| {
        signal(kind).map_err(|e| Error::External(format!("не удалось подписаться на сигнал: {e}")))
    };
    let mut interrupt = register(SignalKind::interrupt())?;
    let mut terminate = register(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("received SIGINT"),
            _ = terminate.recv() => tracing::info!("received SIGTERM"),
        }
    })
}

#[cfg(not(unix))]
pub fn signal() -> Result<impl Future<Output = ()>> {
    let handle = tokio::spawn(tokio::signal::ctrl_c());
    Ok(async move {
        match handle.await {
            Ok(Ok(())) => tracing::info!("received Ctrl-C"),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Ctrl-C listener stopped");
                std::future::pending::<()>().await;
            }
        }
    })
}
