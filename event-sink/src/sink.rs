//! Queuing event sink
//!
//! Buffers messages while no listener is attached and forwards them once one
//! is. One mutex guards the listener slot and the pending queue, but the
//! listener itself is always called with the lock released. A `delivering`
//! flag makes exactly one caller at a time drain the queue front, so
//! delivery order is publish order even when a listener re-enters the sink
//! (detach, attach, publish) from inside `on_message`.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::listener::EventListener;
use crate::message::SinkMessage;

struct Inner<E> {
    listener: Option<Arc<dyn EventListener<E>>>,
    pending: VecDeque<SinkMessage<E>>,
    /// Some caller is draining `pending`; others only enqueue
    delivering: bool,
    closed: bool,
}

/// Clears `delivering` if a listener panics mid-drain
struct DrainGuard<'a, E> {
    inner: &'a Mutex<Inner<E>>,
}

impl<E> Drop for DrainGuard<'_, E> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.inner.lock().delivering = false;
        }
    }
}

/// Ordered, unbounded event sink with an optional attached listener
///
/// Clones share the same queue and listener slot, so the producing side and
/// the transport side can each hold a handle.
///
/// # Example
///
/// ```rust
/// use event_sink::{QueuingEventSink, SinkMessage};
/// use std::sync::{Arc, Mutex};
///
/// let sink = QueuingEventSink::new();
/// sink.success(1);
/// sink.success(2);
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let log = Arc::clone(&seen);
/// sink.attach(move |msg: SinkMessage<i32>| log.lock().unwrap().push(msg));
/// sink.success(3);
///
/// assert_eq!(
///     *seen.lock().unwrap(),
///     vec![SinkMessage::Event(1), SinkMessage::Event(2), SinkMessage::Event(3)]
/// );
/// ```
pub struct QueuingEventSink<E> {
    inner: Arc<Mutex<Inner<E>>>,
}

impl<E: Send + 'static> QueuingEventSink<E> {
    /// Create an empty sink with no listener attached
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                listener: None,
                pending: VecDeque::new(),
                delivering: false,
                closed: false,
            })),
        }
    }

    /// Publish a message, queuing it if no listener is attached
    ///
    /// With a listener attached the message is delivered before this
    /// returns, unless another caller is already draining; that caller then
    /// delivers it in order. A no-op once the sink has been closed.
    pub fn publish(&self, message: SinkMessage<E>) {
        {
            let mut inner = self.inner.lock();
            if inner.closed {
                tracing::trace!("Sink closed, dropping late message");
                return;
            }
            inner.pending.push_back(message);
            if inner.listener.is_none() || inner.delivering {
                return;
            }
            inner.delivering = true;
        }
        self.drain();
    }

    /// Publish an event on the success channel
    pub fn success(&self, event: E) {
        self.publish(SinkMessage::Event(event));
    }

    /// Publish on the error channel
    pub fn error(
        &self,
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) {
        self.publish(SinkMessage::Error {
            code: code.into(),
            message: message.into(),
            details,
        });
    }

    /// Publish the end-of-stream marker
    pub fn end_of_stream(&self) {
        self.publish(SinkMessage::EndOfStream);
    }

    /// Attach a listener and flush everything queued so far, oldest first
    ///
    /// Replaces any listener that was already attached. Called from inside a
    /// delivery, the new listener takes over the rest of the ongoing flush.
    /// Ignored after `close()`.
    pub fn attach<L>(&self, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        {
            let mut inner = self.inner.lock();
            if inner.closed {
                tracing::debug!("Ignoring listener attach on closed sink");
                return;
            }
            tracing::debug!("Listener attached, {} messages queued", inner.pending.len());
            inner.listener = Some(Arc::new(listener));
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }
        self.drain();
    }

    /// Deliver from the queue front until it is empty or the listener goes
    ///
    /// Each message is popped only when it is handed over, so a panicking
    /// listener loses at most the message it panicked on.
    fn drain(&self) {
        let _guard = DrainGuard { inner: &self.inner };
        loop {
            let (listener, message) = {
                let mut inner = self.inner.lock();
                let next = match inner.listener.clone() {
                    Some(listener) => inner.pending.pop_front().map(|m| (listener, m)),
                    None => None,
                };
                match next {
                    Some(next) => next,
                    None => {
                        inner.delivering = false;
                        return;
                    }
                }
            };
            listener.on_message(message);
        }
    }

    /// Detach the current listener; later publishes queue again
    pub fn detach(&self) {
        let mut inner = self.inner.lock();
        if inner.listener.take().is_some() {
            tracing::debug!("Listener detached");
        }
    }

    /// Tear the sink down
    ///
    /// Drops the listener and any queued messages. Every later call is a
    /// silent no-op.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        inner.listener = None;
        if !inner.pending.is_empty() {
            tracing::debug!("Closing sink with {} undelivered messages", inner.pending.len());
        }
        inner.pending.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock().listener.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Number of messages waiting for a listener
    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl<E: Send + 'static> Default for QueuingEventSink<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for QueuingEventSink<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> std::fmt::Debug for QueuingEventSink<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("QueuingEventSink")
            .field("attached", &inner.listener.is_some())
            .field("pending", &inner.pending.len())
            .field("delivering", &inner.delivering)
            .field("closed", &inner.closed)
            .finish()
    }
}
