//! Simulator timer — turns a fixed interval into `SimulatorTick` actions.
//!
//! The ticker never touches device state itself; the app loop applies each
//! tick, so simulator updates and user commands are serialized.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::action::Action;

/// Spawn the ticker. It stops when `cancel` fires or the receiver is gone.
pub fn spawn_simulator(
    interval: Duration,
    action_tx: UnboundedSender<Action>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    info!(?interval, "starting bandwidth simulator");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; the first update is due one
        // full interval after start.
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if action_tx.send(Action::SimulatorTick).is_err() {
                        break;
                    }
                }
            }
        }

        debug!("bandwidth simulator stopped");
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let start = Instant::now();
        let handle = spawn_simulator(Duration::from_secs(2), tx, cancel.clone());

        assert!(matches!(rx.recv().await, Some(Action::SimulatorTick)));
        assert!(start.elapsed() >= Duration::from_secs(2));

        assert!(matches!(rx.recv().await, Some(Action::SimulatorTick)));
        assert!(start.elapsed() >= Duration::from_secs(4));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = spawn_simulator(Duration::from_secs(2), tx, cancel.clone());

        cancel.cancel();
        handle.await.unwrap();

        // The task owned the only sender, so the channel is closed.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_simulator(Duration::from_millis(100), tx, CancellationToken::new());

        drop(rx);
        handle.await.unwrap();
    }
}
