use std::future::{self, Future};
use std::io;
use tokio::sync::broadcast::{self, Receiver, Sender};

/// Listens for the process shutdown signal.
///
/// Shutdown is signalled using a `Receiver`. Only a single value is
/// ever sent. Once a value has been sent via the broadcast channel, or every
/// sender has been dropped, the owning loop should stop.
#[derive(Debug)]
pub struct Shutdown {
    /// `true` if the shutdown signal has been received
    shutdown: bool,

    /// The receive half of the channel used to listen for shutdown.
    notify: Receiver<()>,
}

impl Shutdown {
    /// Create a new `Shutdown` backed by the given `Receiver`.
    pub fn new(notify: Receiver<()>) -> Shutdown {
        Shutdown {
            shutdown: false,
            notify,
        }
    }

    /// Returns `true` if the shutdown signal has been received.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Receive the shutdown notice, waiting if necessary.
    pub async fn recv(&mut self) {
        if self.shutdown {
            return;
        }

        // Cannot receive a "lag error" as only one value is ever sent.
        let _ = self.notify.recv().await;

        self.shutdown = true;
    }
}

/// Spawns a task that broadcasts shutdown on Ctrl-C and returns the listening side.
pub fn on_ctrl_c() -> Shutdown {
    notify_on(tokio::signal::ctrl_c())
}

/// Broadcasts shutdown once `signal` resolves with `Ok`.
///
/// When the handler could not be installed the error is logged and shutdown is never
/// signalled, the process then keeps running until killed.
pub fn notify_on<F>(signal: F) -> Shutdown
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let (notify, recv): (Sender<()>, Receiver<()>) = broadcast::channel(1);

    tokio::task::spawn(async move {
        match signal.await {
            Ok(()) => {
                info!("interrupt received, shutting down");
                let _ = notify.send(());
            }
            Err(e) => {
                error!("unable to listen for interrupt signal: {}", e);
                // dropping `notify` would read as shutdown on the other side.
                future::pending::<()>().await;
                drop(notify);
            }
        }
    });

    Shutdown::new(recv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::timeout;

    #[tokio::test]
    #[timeout(5000)]
    async fn test_recv_after_send() {
        let (notify, recv) = broadcast::channel(1);
        let mut shutdown = Shutdown::new(recv);
        assert!(!shutdown.is_shutdown());

        notify.send(()).unwrap();
        shutdown.recv().await;
        assert!(shutdown.is_shutdown());

        // already shut down, must not wait again.
        shutdown.recv().await;
    }

    #[tokio::test]
    #[timeout(5000)]
    async fn test_recv_when_sender_dropped() {
        let (notify, recv) = broadcast::channel::<()>(1);
        let mut shutdown = Shutdown::new(recv);
        drop(notify);

        shutdown.recv().await;
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test]
    #[timeout(5000)]
    async fn test_notify_on_signal() {
        let mut shutdown = notify_on(async { Ok(()) });
        shutdown.recv().await;
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test]
    #[timeout(5000)]
    async fn test_failed_signal_handler_does_not_shut_down() {
        let mut shutdown = notify_on(async {
            Err(io::Error::new(io::ErrorKind::Other, "no signal handler"))
        });

        let waited = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            shutdown.recv(),
        )
        .await;
        assert!(waited.is_err());
        assert!(!shutdown.is_shutdown());
    }
}
