//! Listener trait and the channel-backed listener
//!
//! A listener is the consumer-side endpoint of the sink. The transport that
//! carries events out of the process implements `EventListener`; tests and
//! sync consumers usually reach for [`channel_listener`] instead.

use std::sync::mpsc;

use crate::iter::MessageIterator;
use crate::message::SinkMessage;

/// Receives messages flushed or forwarded by a `QueuingEventSink`
///
/// The sink never holds its lock while calling `on_message`, so a listener
/// may detach, re-attach or publish on the same sink from inside the call.
/// Messages published that way are delivered after the current one.
pub trait EventListener<E>: Send + Sync {
    fn on_message(&self, message: SinkMessage<E>);
}

impl<E, F> EventListener<E> for F
where
    F: Fn(SinkMessage<E>) + Send + Sync,
{
    fn on_message(&self, message: SinkMessage<E>) {
        self(message)
    }
}

/// Listener that forwards every message into an `mpsc` channel
pub struct ChannelListener<E> {
    tx: mpsc::Sender<SinkMessage<E>>,
}

impl<E: Send> EventListener<E> for ChannelListener<E> {
    fn on_message(&self, message: SinkMessage<E>) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Channel listener receiver dropped, message discarded");
        }
    }
}

impl<E> Clone for ChannelListener<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Create a channel listener and the iterator that reads from it
///
/// # Example
///
/// ```rust
/// use event_sink::{channel_listener, QueuingEventSink};
///
/// let sink = QueuingEventSink::<&'static str>::new();
/// sink.success("queued");
///
/// let (listener, messages) = channel_listener();
/// sink.attach(listener);
///
/// let received: Vec<_> = messages.try_iter().filter_map(|m| m.into_event()).collect();
/// assert_eq!(received, vec!["queued"]);
/// ```
pub fn channel_listener<E>() -> (ChannelListener<E>, MessageIterator<E>) {
    let (tx, rx) = mpsc::channel();
    (ChannelListener { tx }, MessageIterator::new(rx))
}
