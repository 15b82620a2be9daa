//! OS signal handling for run cancellation.
//!
//! [`wait_for_shutdown_signal`] completes once the process receives a
//! termination request. On Unix this covers SIGINT (Ctrl-C) and SIGTERM,
//! with [`tokio::signal::ctrl_c`] awaited as a fallback; elsewhere only
//! Ctrl-C is awaited.

#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
