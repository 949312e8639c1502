//! Graceful shutdown on Ctrl-C or SIGTERM.

use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Listener for the signals that stop the server.
///
/// SIGTERM is registered when the listener is created, so a termination
/// request that arrives before [`ShutdownSignal::recv`] is polled is not
/// lost. Must be created inside a tokio runtime.
pub struct ShutdownSignal {
    #[cfg(unix)]
    terminate: Option<Signal>,
}

impl ShutdownSignal {
    pub fn install() -> Self {
        #[cfg(unix)]
        let terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => Some(stream),
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                None
            }
        };

        Self {
            #[cfg(unix)]
            terminate,
        }
    }

    /// Wait until either signal arrives.
    pub async fn recv(self) {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("received Ctrl-C"),
                Err(e) => {
                    error!(error = %e, "failed to listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            match self.terminate {
                Some(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                }
                None => std::future::pending::<()>().await,
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {}
            () = terminate => {}
        }
    }
}
