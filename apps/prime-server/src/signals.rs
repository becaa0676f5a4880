use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Token cancelled on the first Ctrl+C or SIGTERM.
#[must_use]
pub fn shutdown_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown().await {
            tracing::warn!(error = %e, "signal handling failed, falling back to Ctrl+C only");
            let _ = signal::ctrl_c().await;
        }
        trigger.cancel();
    });
    cancel
}

/// Wait for termination signals (Ctrl+C, SIGTERM).
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Received Ctrl+C signal");
        }
        result = wait_sigterm() => {
            result?;
            tracing::info!("Received SIGTERM signal");
        }
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<()> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    sigterm.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<()> {
    std::future::pending::<Result<()>>().await
}
