// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graceful shutdown coordination with signal handling.
//!
//! Installs handlers for SIGTERM and SIGINT (Ctrl+C), triggering a
//! [`CancellationToken`] that the dispatch loop monitors. In-flight turns
//! are drained before the process exits.

use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received. If SIGTERM cannot be watched, only Ctrl+C triggers shutdown.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "cannot watch SIGTERM, falling back to Ctrl+C only");
            ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = ctrl_c() => {}
        _ = sigterm.recv() => {
            info!("received SIGTERM, initiating shutdown");
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received SIGINT (Ctrl+C), initiating shutdown"),
        Err(e) => {
            warn!(error = %e, "cannot watch Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

/// Waits up to `grace` for in-flight turns, then aborts the rest.
///
/// Returns the number of turns that were interrupted.
pub async fn drain_tasks(tasks: &mut JoinSet<()>, grace: Duration) -> usize {
    if tasks.is_empty() {
        info!("no turns in flight");
        return 0;
    }
    info!(count = tasks.len(), "waiting for in-flight turns to complete");

    let drained = tokio::time::timeout(grace, async {
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "turn task failed during drain");
            }
        }
    })
    .await;

    if drained.is_ok() {
        info!("all turns drained");
        return 0;
    }
    let remaining = tasks.len();
    warn!(remaining, "grace period elapsed, interrupting turns");
    tasks.shutdown().await;
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test]
    async fn install_signal_handler_returns_live_token() {
        let token = install_signal_handler();
        assert!(!token.is_cancelled());
        token.cancel();
    }

    #[tokio::test]
    #[traced_test]
    async fn draining_nothing_is_immediate() {
        let mut tasks = JoinSet::new();
        assert_eq!(drain_tasks(&mut tasks, Duration::from_millis(10)).await, 0);
        assert!(logs_contain("no turns in flight"));
    }

    #[tokio::test]
    async fn quick_turns_finish_within_grace() {
        let mut tasks = JoinSet::new();
        for _ in 0..3 {
            tasks.spawn(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
            });
        }
        assert_eq!(drain_tasks(&mut tasks, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn stuck_turns_are_interrupted() {
        let mut tasks = JoinSet::new();
        tasks.spawn(std::future::pending::<()>());
        tasks.spawn(async {});
        let interrupted = drain_tasks(&mut tasks, Duration::from_secs(1)).await;
        assert_eq!(interrupted, 1);
        assert!(logs_contain("grace period elapsed"));
        assert!(tasks.is_empty());
    }
}
