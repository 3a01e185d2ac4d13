//! Termination signals for the bridge runner

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::Colorize;

/// Raise `flag` on the first termination signal.
///
/// Listens for SIGINT and SIGTERM on unix, Ctrl+C elsewhere. Must be called
/// inside the tokio runtime.
pub async fn watch_termination(flag: Arc<AtomicBool>) -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            let received = tokio::select! {
                _ = interrupt.recv() => "SIGINT",
                _ = terminate.recv() => "SIGTERM",
            };
            request_stop(&flag, received);
        });
    }

    #[cfg(not(unix))]
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            request_stop(&flag, "Ctrl+C");
        }
    });

    Ok(())
}

/// Raise the stop flag once.
///
/// # Returns
/// `true` if this call raised it
fn request_stop(flag: &AtomicBool, received: &str) -> bool {
    let first = !flag.swap(true, Ordering::SeqCst);
    if first {
        eprintln!("{} {} received, stopping bridge", "↓".cyan(), received);
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_request_counts() {
        let flag = AtomicBool::new(false);
        assert!(request_stop(&flag, "SIGINT"));
        assert!(!request_stop(&flag, "SIGTERM"));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn watching_leaves_flag_down() {
        let flag = Arc::new(AtomicBool::new(false));
        watch_termination(Arc::clone(&flag)).await.unwrap();
        assert!(!flag.load(Ordering::SeqCst));
    }
}
