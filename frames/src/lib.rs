//! Sync frame model and protobuf codec for the maze game wire.
//!
//! Every delta a client announces to its peers and to the game authority is
//! carried as a [`Frame`]: a namespaced `syscall` (`"hero:moved"`,
//! `"tile:placed"`, ...) plus a JSON payload. Payloads stay as
//! `serde_json::Value` so the rule engine owns their shape, while the wire
//! encoding is protobuf for compact binary transport.

use std::time::{SystemTime, UNIX_EPOCH};

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error returned by [`decode_frame`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireFrame`.
    #[error("failed to decode protobuf frame: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The `kind` integer on the wire does not map to a known [`FrameKind`].
    #[error("invalid frame kind: {0}")]
    InvalidKind(i32),
}

/// Whether a frame announces a delta or asks the authority to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    /// A local state change already applied optimistically by the sender.
    Delta,
    /// A request only the game authority can fulfil (role swap, AI recompute).
    Request,
}

impl FrameKind {
    /// Convert into the wire enum integer value.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Delta => WireFrameKind::Delta as i32,
            Self::Request => WireFrameKind::Request as i32,
        }
    }

    fn from_i32(value: i32) -> Result<Self, CodecError> {
        match WireFrameKind::try_from(value) {
            Ok(WireFrameKind::Delta) => Ok(Self::Delta),
            Ok(WireFrameKind::Request) => Ok(Self::Request),
            Err(_) => Err(CodecError::InvalidKind(value)),
        }
    }
}

/// A single message on the game sync wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unique identifier for this frame (UUID string).
    pub id: String,
    /// Milliseconds since the Unix epoch when the frame was built.
    pub ts: i64,
    /// Game session this frame belongs to, if known.
    pub game_id: Option<String>,
    /// Sending player, if known.
    pub from: Option<String>,
    /// Namespaced operation name, e.g. `"hero:moved"`.
    pub syscall: String,
    /// Delta or authority request.
    pub kind: FrameKind,
    /// JSON payload.
    pub data: Value,
}

impl Frame {
    /// Build a frame stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(syscall: impl Into<String>, kind: FrameKind, data: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ts: now_ms(),
            game_id: None,
            from: None,
            syscall: syscall.into(),
            kind,
            data,
        }
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
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// Encode a frame into protobuf bytes.
#[must_use]
pub fn encode_frame(frame: &Frame) -> Vec<u8> {
    frame_to_wire(frame).encode_to_vec()
}

/// Decode protobuf bytes into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes and
/// [`CodecError::InvalidKind`] for out-of-range kind values.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, CodecError> {
    let wire = WireFrame::decode(bytes)?;
    wire_to_frame(wire)
}

fn frame_to_wire(frame: &Frame) -> WireFrame {
    WireFrame {
        id: frame.id.clone(),
        ts: frame.ts,
        game_id: frame.game_id.clone(),
        from: frame.from.clone(),
        syscall: frame.syscall.clone(),
        kind: frame.kind.as_i32(),
        data: Some(json_to_proto(&frame.data)),
    }
}

fn wire_to_frame(wire: WireFrame) -> Result<Frame, CodecError> {
    Ok(Frame {
        id: wire.id,
        ts: wire.ts,
        game_id: wire.game_id,
        from: wire.from,
        syscall: wire.syscall,
        kind: FrameKind::from_i32(wire.kind)?,
        data: wire
            .data
            .map_or(Value::Object(Map::new()), |v| proto_to_json(&v)),
    })
}

fn json_to_proto(value: &Value) -> prost_types::Value {
    use prost_types::value::Kind;

    let kind = match value {
        Value::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Value::Bool(v) => Kind::BoolValue(*v),
        Value::Number(v) => Kind::NumberValue(v.as_f64().unwrap_or(0.0)),
        Value::String(v) => Kind::StringValue(v.clone()),
        Value::Array(items) => Kind::ListValue(prost_types::ListValue {
            values: items.iter().map(json_to_proto).collect(),
        }),
        Value::Object(fields) => Kind::StructValue(prost_types::Struct {
            fields: fields
                .iter()
                .map(|(k, v)| (k.clone(), json_to_proto(v)))
                .collect(),
        }),
    };

    prost_types::Value { kind: Some(kind) }
}

/// Protobuf numbers are always `f64`; integral values come back as JSON
/// integers so that cell coordinates and ids keep their integer type.
fn proto_to_json(value: &prost_types::Value) -> Value {
    use prost_types::value::Kind;

    let Some(kind) = &value.kind else {
        return Value::Null;
    };

    match kind {
        Kind::NullValue(_) => Value::Null,
        Kind::NumberValue(v) => number_to_json(*v),
        Kind::StringValue(v) => Value::String(v.clone()),
        Kind::BoolValue(v) => Value::Bool(*v),
        Kind::StructValue(s) => Value::Object(
            s.fields
                .iter()
                .map(|(k, v)| (k.clone(), proto_to_json(v)))
                .collect(),
        ),
        Kind::ListValue(list) => Value::Array(list.values.iter().map(proto_to_json).collect()),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn number_to_json(v: f64) -> Value {
    const SAFE_INT: f64 = 9_007_199_254_740_992.0;
    if v.fract() == 0.0 && v.abs() < SAFE_INT {
        return Value::from(v as i64);
    }
    serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
}

#[derive(Clone, PartialEq, Message)]
struct WireFrame {
    #[prost(string, tag = "1")]
    id: String,
    #[prost(int64, tag = "2")]
    ts: i64,
    #[prost(string, optional, tag = "3")]
    game_id: Option<String>,
    #[prost(string, optional, tag = "4")]
    from: Option<String>,
    #[prost(string, tag = "5")]
    syscall: String,
    #[prost(enumeration = "WireFrameKind", tag = "6")]
    kind: i32,
    #[prost(message, optional, tag = "7")]
    data: Option<prost_types::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
enum WireFrameKind {
    Delta = 0,
    Request = 1,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
