//! Shutdown signal handling.
//!
//! Serving stops gracefully on Ctrl+C or, on Unix, SIGTERM.

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("installing the Ctrl+C handler failed: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("installing the SIGTERM handler failed: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("installing the terminate handler failed: {0}")]
    Terminate(#[source] io::Error),
}

/// Block until a shutdown signal arrives, then stop the server gracefully.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(windows)]
    let terminate = async {
        signal::windows::ctrl_c()
            .map_err(ShutdownSignalError::Terminate)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("received Ctrl+C, shutting down");
        }
        result = terminate => {
            result?;
            info!("received terminate signal, shutting down");
        }
    };

    // In-flight requests are drained with no deadline.
    handle.stop_graceful(None);

    Ok(())
}
