//! Messages carried by the sink
//!
//! A `SinkMessage` is what the queue stores and what a listener receives.
//! Success events, error notifications and the end-of-stream marker share
//! one queue so their relative order is preserved.

/// A single message on its way to the remote listener
#[derive(Debug, Clone, PartialEq)]
pub enum SinkMessage<E> {
    /// A regular event on the success channel
    Event(E),

    /// An error on the distinct error channel
    Error {
        /// Machine-readable error kind (e.g. `"VideoError"`)
        code: String,
        /// Human-readable description
        message: String,
        /// Optional extra payload
        details: Option<String>,
    },

    /// The stream has finished
    EndOfStream,
}

impl<E> SinkMessage<E> {
    /// Build an error message
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        SinkMessage::Error {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Returns the event payload if this is a success message
    pub fn as_event(&self) -> Option<&E> {
        match self {
            SinkMessage::Event(event) => Some(event),
            _ => None,
        }
    }

    /// Consume the message, keeping only a success payload
    pub fn into_event(self) -> Option<E> {
        match self {
            SinkMessage::Event(event) => Some(event),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SinkMessage::Error { .. })
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SinkMessage::EndOfStream)
    }
}

impl<E> From<E> for SinkMessage<E> {
    fn from(event: E) -> Self {
        SinkMessage::Event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let msg = SinkMessage::Event(7u32);
        assert_eq!(msg.as_event(), Some(&7));
        assert!(!msg.is_error());
        assert!(!msg.is_end_of_stream());
        assert_eq!(msg.into_event(), Some(7));
    }

    #[test]
    fn test_error_constructor() {
        let msg: SinkMessage<u32> = SinkMessage::error("VideoError", "decoder failed");

        assert!(msg.is_error());
        assert_eq!(msg.as_event(), None);
        assert_eq!(
            msg,
            SinkMessage::Error {
                code: "VideoError".to_string(),
                message: "decoder failed".to_string(),
                details: None,
            }
        );
    }

    #[test]
    fn test_end_of_stream() {
        let msg: SinkMessage<u32> = SinkMessage::EndOfStream;
        assert!(msg.is_end_of_stream());
        assert_eq!(msg.into_event(), None);
    }
}
