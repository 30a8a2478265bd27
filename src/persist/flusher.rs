//! Single consumer of the search's output queue.
//!
//! The search runs on a blocking thread and hands cycles over through a
//! bounded channel. The flush task owns the [`BatchWriter`], so the size
//! trigger, the periodic trigger and the final drain are serialized.

use std::ops::ControlFlow;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::BatchWriter;
use crate::arb::finder::CycleSink;
use crate::arb::types::Cycle;
use crate::db_service::PathStore;
use crate::error::StoreError;

/// Forwards cycles from a blocking search thread into the flush task.
///
/// Must not be used from inside the async runtime.
pub struct ChannelSink {
    /// Sending half of the flush queue
    tx: mpsc::Sender<Cycle>,
}

impl ChannelSink {
    /// Wraps the sending half of the flush queue
    #[must_use]
    pub fn new(tx: mpsc::Sender<Cycle>) -> Self {
        Self { tx }
    }
}

impl CycleSink for ChannelSink {
    fn accept(&mut self, cycle: Cycle) -> ControlFlow<()> {
        // blocks while the queue is full
        match self.tx.blocking_send(cycle) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => {
                debug!("flusher::accept: Flush task is gone, stopping search");
                ControlFlow::Break(())
            }
        }
    }
}

/// Spawns the flush task.
///
/// The task pushes every received cycle into `writer`, flushes every `period`,
/// and drains the writer once all senders are dropped. It resolves to the
/// number of committed paths, or to the first storage error, in which case the
/// receiver is dropped and the sending side observes a closed channel.
pub fn spawn_flusher<S: PathStore + 'static>(
    mut writer: BatchWriter<S>,
    mut rx: mpsc::Receiver<Cycle>,
    period: Duration,
) -> JoinHandle<Result<usize, StoreError>> {
    tokio::spawn(async move {
        let period = period.max(Duration::from_millis(1));
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(cycle) => writer.push(&cycle).await?,
                    None => break,
                },
                _ = ticker.tick() => {
                    let written = writer.flush().await?;
                    if written > 0 {
                        debug!("flusher::tick: Periodic flush wrote {written} paths");
                    }
                }
            }
        }

        // no periodic flush may start once draining begins
        drop(ticker);
        let total = writer.drain().await?;
        info!("flusher::drain: Search finished, {total} paths committed");
        Ok(total)
    })
}
