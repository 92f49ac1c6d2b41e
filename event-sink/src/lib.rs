//! Queuing Event Sink
//!
//! An ordered, unbounded buffer of outbound messages with an optional
//! attached listener. Nothing published is ever dropped while the sink is
//! open: messages produced before a listener attaches (or between a detach
//! and the next attach) are flushed to the next listener in publish order.
//!
//! # Quick Start
//!
//! ```rust
//! use event_sink::{channel_listener, QueuingEventSink, SinkMessage};
//!
//! let sink = QueuingEventSink::new();
//!
//! // Nobody is listening yet, so these are queued
//! sink.success("bufferingStart");
//! sink.success("bufferingEnd");
//!
//! // Attaching flushes the queue, oldest first
//! let (listener, messages) = channel_listener();
//! sink.attach(listener);
//!
//! // Later publishes are forwarded synchronously
//! sink.error("VideoError", "source unavailable", None);
//!
//! let received: Vec<_> = messages.try_iter().collect();
//! assert_eq!(received.len(), 3);
//! assert_eq!(received[0], SinkMessage::Event("bufferingStart"));
//! ```
//!
//! # Architecture
//!
//! ```text
//! QueuingEventSink<E>
//!     │
//!     └── Mutex<Inner>
//!             ├── listener:   Option<Arc<dyn EventListener<E>>>
//!             ├── pending:    VecDeque<SinkMessage<E>>
//!             ├── delivering: bool
//!             └── closed:     bool
//! ```

pub mod iter;
pub mod listener;
pub mod message;
pub mod sink;

pub use iter::{MessageIterator, TimeoutIter, TryIter};
pub use listener::{channel_listener, ChannelListener, EventListener};
pub use message::SinkMessage;
pub use sink::QueuingEventSink;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::listener::{channel_listener, EventListener};
    pub use crate::message::SinkMessage;
    pub use crate::sink::QueuingEventSink;
}
