//! Sequential consumer of the command stream.

use std::time::Instant;

use event_store::{EventStore, ResolvedEvent, SubscribeOptions, Subscription};
use projections::ProjectionQueries;
use tokio::sync::watch;

use crate::Result;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::streams::COMMAND_STREAM;

/// Counters reported when the consumer stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub received: u64,
    pub handled: u64,
    pub ignored: u64,
    pub failed: u64,
}

/// Pulls commands one at a time and awaits each before the next, so results
/// are appended in command order.
pub struct CommandConsumer<S, Q> {
    dispatcher: Dispatcher<S, Q>,
    subscription: Subscription,
}

impl<S: EventStore, Q: ProjectionQueries> CommandConsumer<S, Q> {
    pub fn new(dispatcher: Dispatcher<S, Q>, subscription: Subscription) -> Self {
        Self {
            dispatcher,
            subscription,
        }
    }

    /// Subscribes to the command stream from its end, resolving links.
    ///
    /// Commands appended before this call are never delivered.
    pub async fn subscribe(store: &S, dispatcher: Dispatcher<S, Q>) -> Result<Self> {
        let subscription = store
            .subscribe_to_stream(
                COMMAND_STREAM,
                SubscribeOptions::from_end().resolve_link_tos(),
            )
            .await?;
        tracing::info!(stream = COMMAND_STREAM, "subscribed to commands");
        Ok(Self::new(dispatcher, subscription))
    }

    /// Runs until the subscription ends or `shutdown` turns true.
    ///
    /// Failures are logged and counted; the loop moves on to the next command.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> ConsumerStats {
        let mut stats = ConsumerStats::default();

        loop {
            if *shutdown.borrow() {
                tracing::info!("shutdown requested, stopping consumer");
                break;
            }

            let delivery = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        tracing::info!("shutdown handle dropped, stopping consumer");
                        break;
                    }
                    continue;
                }
                delivery = self.subscription.next_event() => delivery,
            };

            let Some(delivery) = delivery else {
                tracing::info!(stream = COMMAND_STREAM, "subscription ended");
                break;
            };

            stats.received += 1;
            metrics::counter!("commands_received_total").increment(1);

            match delivery {
                Ok(resolved) => self.process(&resolved, &mut stats).await,
                Err(error) => {
                    stats.failed += 1;
                    metrics::counter!("commands_failed_total").increment(1);
                    tracing::error!(%error, "subscription delivered an error");
                }
            }
        }

        tracing::info!(?stats, "consumer stopped");
        stats
    }

    async fn process(&self, resolved: &ResolvedEvent, stats: &mut ConsumerStats) {
        let started = Instant::now();

        match self.dispatcher.dispatch(resolved).await {
            Ok(Dispatch::Handled(_)) => stats.handled += 1,
            Ok(Dispatch::Ignored) => {
                stats.ignored += 1;
                metrics::counter!("commands_ignored_total").increment(1);
            }
            Err(error) => {
                stats.failed += 1;
                metrics::counter!("commands_failed_total").increment(1);
                tracing::error!(
                    %error,
                    command_type = %resolved.event.event_type,
                    revision = %resolved.original_revision(),
                    "command handling failed"
                );
            }
        }

        metrics::histogram!("command_handling_duration_seconds")
            .record(started.elapsed().as_secs_f64());
    }
}
