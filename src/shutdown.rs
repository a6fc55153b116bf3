//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::future::{self, Future};
use std::io;

use tokio::signal;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// A listener that cannot be installed is logged and ignored, so the other
/// one can still trigger shutdown.
pub async fn shutdown_signal() -> Signal {
    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        sigterm.recv().await;
        Ok::<(), io::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<io::Result<()>>();

    first_signal(signal::ctrl_c(), terminate).await
}

async fn first_signal(
    interrupt: impl Future<Output = io::Result<()>>,
    terminate: impl Future<Output = io::Result<()>>,
) -> Signal {
    let received = tokio::select! {
        signal = listen(Signal::Interrupt, interrupt) => signal,
        signal = listen(Signal::Terminate, terminate) => signal,
    };

    info!("Received {:?}, initiating shutdown...", received);
    received
}

async fn listen(kind: Signal, listener: impl Future<Output = io::Result<()>>) -> Signal {
    match listener.await {
        Ok(()) => kind,
        Err(err) => {
            error!("Failed to listen for {:?}: {}", kind, err);
            future::pending().await
        }
    }
}
