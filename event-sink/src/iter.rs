//! Receiving side of a [`ChannelListener`](crate::ChannelListener)
//!
//! Messages can be pulled one at a time (`recv`, `try_recv`,
//! `recv_timeout`), drained (`try_iter`), or consumed until the stream goes
//! quiet (`timeout_iter`) or ends (`events`).

use std::sync::{mpsc, Arc};
use std::time::Duration;

use parking_lot::Mutex;

use crate::message::SinkMessage;

/// Pull-based view of the messages a channel listener has received
///
/// Clones share one receiver, so each message is seen by exactly one
/// clone. Iteration ends once every sending `ChannelListener` is gone.
pub struct MessageIterator<E> {
    receiver: Arc<Mutex<mpsc::Receiver<SinkMessage<E>>>>,
}

impl<E> MessageIterator<E> {
    pub(crate) fn new(receiver: mpsc::Receiver<SinkMessage<E>>) -> Self {
        Self {
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Wait for the next message; `None` once all senders are dropped
    pub fn recv(&self) -> Option<SinkMessage<E>> {
        self.receiver.lock().recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<SinkMessage<E>> {
        self.receiver.lock().recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<SinkMessage<E>> {
        self.receiver.lock().try_recv().ok()
    }

    /// Drain whatever has already arrived
    pub fn try_iter(&self) -> TryIter<'_, E> {
        TryIter { source: self }
    }

    /// Yield messages until none arrives within `idle`
    pub fn timeout_iter(&self, idle: Duration) -> TimeoutIter<'_, E> {
        TimeoutIter { source: self, idle }
    }

    /// Block for success-channel payloads until end of stream
    ///
    /// Error messages are skipped. Stops at `EndOfStream` or when the
    /// senders are gone.
    pub fn events(&self) -> impl Iterator<Item = E> + '_ {
        std::iter::from_fn(move || self.recv())
            .take_while(|message| !message.is_end_of_stream())
            .filter_map(SinkMessage::into_event)
    }
}

impl<E> Iterator for MessageIterator<E> {
    type Item = SinkMessage<E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

impl<E> Clone for MessageIterator<E> {
    fn clone(&self) -> Self {
        Self {
            receiver: Arc::clone(&self.receiver),
        }
    }
}

/// See [`MessageIterator::try_iter`]
pub struct TryIter<'a, E> {
    source: &'a MessageIterator<E>,
}

impl<E> Iterator for TryIter<'_, E> {
    type Item = SinkMessage<E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.try_recv()
    }
}

/// See [`MessageIterator::timeout_iter`]
pub struct TimeoutIter<'a, E> {
    source: &'a MessageIterator<E>,
    idle: Duration,
}

impl<E> Iterator for TimeoutIter<'_, E> {
    type Item = SinkMessage<E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.recv_timeout(self.idle)
    }
}
