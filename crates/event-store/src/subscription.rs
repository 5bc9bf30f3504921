use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;

use crate::{ResolvedEvent, Result};

/// Sending half handed to the store that feeds a [`Subscription`].
pub type SubscriptionSender = mpsc::UnboundedSender<Result<ResolvedEvent>>;

/// An ordered feed of events from one stream.
///
/// Events arrive in the order they were appended. The feed ends when the
/// store drops its sending half.
pub struct Subscription {
    stream: String,
    receiver: mpsc::UnboundedReceiver<Result<ResolvedEvent>>,
}

impl Subscription {
    /// Creates a connected sender/subscription pair for `stream`.
    pub fn channel(stream: impl Into<String>) -> (SubscriptionSender, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            sender,
            Self {
                stream: stream.into(),
                receiver,
            },
        )
    }

    /// Waits for the next delivery.
    pub async fn next_event(&mut self) -> Option<Result<ResolvedEvent>> {
        self.receiver.recv().await
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}

impl Stream for Subscription {
    type Item = Result<ResolvedEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
