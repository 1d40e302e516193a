//! Outbound synchronization: normalized change messages and the ordered
//! outbox the engine appends to.
//!
//! The engine never waits on the network. It applies a change locally, then
//! appends the matching [`Message`]; a transport drains the outbox later.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::VecDeque;

use frames::{Frame, FrameKind};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::board::CellPos;
use crate::hero::HeroId;
use crate::tile::{Orientation, TileId};

pub const SYSCALL_TILE_PLACED: &str = "tile:placed";
pub const SYSCALL_HERO_MOVED: &str = "hero:moved";
pub const SYSCALL_RECOMPUTE_AI: &str = "ai:recompute";
pub const SYSCALL_CLOCK_INVERTED: &str = "clock:inverted";
pub const SYSCALL_CELL_USED: &str = "cell:used";
pub const SYSCALL_ROLES_SWAP: &str = "roles:swap";
pub const SYSCALL_PAUSE: &str = "game:pause";

/// A state delta or authority request announced to peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    TilePlaced { origin: CellPos, tile_id: TileId, orientation: Orientation },
    HeroMoved { hero_id: HeroId, cell: CellPos },
    /// A hero release was rejected locally; the authority should resync.
    RecomputeAi,
    ClockInverted,
    CellUsed { x: i32, y: i32 },
    RolesSwapRequested,
    PauseRequested { paused: bool },
}

impl Message {
    #[must_use]
    pub fn syscall(&self) -> &'static str {
        match self {
            Self::TilePlaced { .. } => SYSCALL_TILE_PLACED,
            Self::HeroMoved { .. } => SYSCALL_HERO_MOVED,
            Self::RecomputeAi => SYSCALL_RECOMPUTE_AI,
            Self::ClockInverted => SYSCALL_CLOCK_INVERTED,
            Self::CellUsed { .. } => SYSCALL_CELL_USED,
            Self::RolesSwapRequested => SYSCALL_ROLES_SWAP,
            Self::PauseRequested { .. } => SYSCALL_PAUSE,
        }
    }

    /// Requests only the authority acts on; everything else is a delta
    /// already applied by the sender.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::RecomputeAi | Self::RolesSwapRequested => FrameKind::Request,
            _ => FrameKind::Delta,
        }
    }

    /// JSON payload carried in the frame's `data`.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::TilePlaced { origin, tile_id, orientation } => {
                json!({ "origin": origin, "tile_id": tile_id, "orientation": orientation })
            }
            Self::HeroMoved { hero_id, cell } => json!({ "hero_id": hero_id, "cell": cell }),
            Self::CellUsed { x, y } => json!({ "x": x, "y": y }),
            Self::PauseRequested { paused } => json!({ "paused": paused }),
            Self::RecomputeAi | Self::ClockInverted | Self::RolesSwapRequested => json!({}),
        }
    }

    /// Wrap the message in a wire frame.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.syscall(), self.kind(), self.payload())
    }

    /// Rebuild a message from a received frame.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnknownSyscall`] for syscalls this engine does
    /// not speak and [`DecodeError::Payload`] when `data` has the wrong shape.
    pub fn from_frame(frame: &Frame) -> Result<Self, DecodeError> {
        let data = &frame.data;
        let message = match frame.syscall.as_str() {
            SYSCALL_TILE_PLACED => Self::TilePlaced {
                origin: field(data, "origin")?,
                tile_id: field(data, "tile_id")?,
                orientation: field(data, "orientation")?,
            },
            SYSCALL_HERO_MOVED => Self::HeroMoved { hero_id: field(data, "hero_id")?, cell: field(data, "cell")? },
            SYSCALL_RECOMPUTE_AI => Self::RecomputeAi,
            SYSCALL_CLOCK_INVERTED => Self::ClockInverted,
            SYSCALL_CELL_USED => Self::CellUsed { x: field(data, "x")?, y: field(data, "y")? },
            SYSCALL_ROLES_SWAP => Self::RolesSwapRequested,
            SYSCALL_PAUSE => Self::PauseRequested { paused: field(data, "paused")? },
            other => return Err(DecodeError::UnknownSyscall(other.to_owned())),
        };
        Ok(message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown syscall: {0}")]
    UnknownSyscall(String),
    #[error("bad payload field '{field}': {source}")]
    Payload {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn field<T>(data: &Value, name: &'static str) -> Result<T, DecodeError>
where
    T: serde::de::DeserializeOwned,
{
    let raw = data.get(name).cloned().unwrap_or(Value::Null);
    serde_json::from_value(raw).map_err(|source| DecodeError::Payload { field: name, source })
}

/// Ordered queue of messages waiting for the transport.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: VecDeque<Message>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Take every pending message in emission order.
    pub fn drain(&mut self) -> Vec<Message> {
        self.queue.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.queue.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
