//! Outbox transport over an in-process channel.
//!
//! A `Transport` turns queued messages into protobuf frames and hands them to
//! an unbounded channel. Whatever sits on the other end (websocket writer,
//! replay log, test harness) owns delivery; the engine never waits on it.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use frames::{CodecError, decode_frame, encode_frame};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::sync::{DecodeError, Message, Outbox};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport channel closed")]
    Closed,
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub struct Transport {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    game_id: Option<String>,
    from: Option<String>,
}

impl Transport {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self { tx, game_id: None, from: None }
    }

    #[must_use]
    pub fn with_game_id(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }

    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Encode one message as a frame stamped with this session's identity.
    #[must_use]
    pub fn encode(&self, message: &Message) -> Vec<u8> {
        let mut frame = message.to_frame();
        if let Some(game_id) = &self.game_id {
            frame = frame.with_game_id(game_id.as_str());
        }
        if let Some(from) = &self.from {
            frame = frame.with_from(from.as_str());
        }
        encode_frame(&frame)
    }

    /// Send every queued message in order. Returns how many were sent.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] when the receiver is gone. Messages
    /// not yet sent at that point are dropped.
    pub fn flush(&self, outbox: &mut Outbox) -> Result<usize, TransportError> {
        let pending = outbox.drain();
        let total = pending.len();
        for (sent, message) in pending.iter().enumerate() {
            if self.tx.send(self.encode(message)).is_err() {
                warn!(sent, dropped = total - sent, "transport closed during flush");
                return Err(TransportError::Closed);
            }
            debug!(syscall = message.syscall(), "frame sent");
        }
        Ok(total)
    }
}

/// Decode a received frame into a message.
///
/// # Errors
///
/// Returns [`TransportError::Codec`] for malformed bytes and
/// [`TransportError::Decode`] for unknown syscalls or payloads.
pub fn decode_message(bytes: &[u8]) -> Result<Message, TransportError> {
    let frame = decode_frame(bytes)?;
    Ok(Message::from_frame(&frame)?)
}
