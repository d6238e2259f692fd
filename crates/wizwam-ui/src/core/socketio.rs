//! Socket.IO packet codec (transport-only).
//!
//! # Design
//! - Speak Engine.IO v4 text frames over a plain websocket; no polling
//!   transport and no binary attachments.
//! - Keep this module DOM-free so it can run in tests and non-wasm contexts.
//! - Decode event packets straight into typed [`PushEvent`]s; names the UI
//!   does not consume are ignored rather than treated as errors.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use wizwam_events::{EventDecodeError, PushEvent};

/// Namespace the server emits on.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Engine.IO open packet payload.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Handshake {
    /// Engine session id.
    pub sid: String,
    /// Server ping cadence.
    #[serde(rename = "pingInterval", default)]
    pub ping_interval: u64,
    /// Grace period after a missed ping.
    #[serde(rename = "pingTimeout", default)]
    pub ping_timeout: u64,
}

impl Handshake {
    /// Silence after which the session counts as dead: one ping interval plus
    /// its grace period. `None` when the server announced no heartbeat.
    #[must_use]
    pub fn silence_limit_ms(&self) -> Option<u32> {
        if self.ping_interval == 0 {
            return None;
        }
        let limit = self.ping_interval.saturating_add(self.ping_timeout);
        Some(u32::try_from(limit).unwrap_or(u32::MAX))
    }
}

/// Engine.IO frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePacket {
    /// `0`: session opened.
    Open(Handshake),
    /// `1`: session closed.
    Close,
    /// `2`: heartbeat probe; must be answered with a pong.
    Ping(String),
    /// `3`: heartbeat answer.
    Pong(String),
    /// `4`: Socket.IO packet.
    Message(String),
    /// `5`: transport upgrade.
    Upgrade,
    /// `6`: no-op.
    Noop,
}

/// Socket.IO packet carried inside an engine message.
#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    /// `0`: namespace joined.
    Connect {
        /// Namespace.
        namespace: String,
        /// Socket session id.
        sid: Option<String>,
    },
    /// `1`: namespace left.
    Disconnect {
        /// Namespace.
        namespace: String,
    },
    /// `2`: named event.
    Event {
        /// Namespace.
        namespace: String,
        /// Acknowledgement id requested by the sender.
        ack: Option<u64>,
        /// Event name.
        name: String,
        /// Event arguments after the name.
        args: Vec<Value>,
    },
    /// `3`: acknowledgement.
    Ack {
        /// Namespace.
        namespace: String,
        /// Acknowledged id.
        ack: Option<u64>,
    },
    /// `4`: namespace join refused.
    ConnectError {
        /// Namespace.
        namespace: String,
        /// Server reason.
        message: String,
    },
    /// `5`/`6`: binary event or ack; attachments are not supported.
    Binary,
}

/// What the socket runner should do with a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
    /// Engine session opened; join the default namespace.
    Handshake(Handshake),
    /// Answer with [`encode_pong`].
    Ping(String),
    /// Namespace joined.
    Joined {
        /// Socket session id.
        sid: Option<String>,
    },
    /// Server left the namespace.
    Left,
    /// Server refused the namespace join.
    Rejected(String),
    /// Typed push event.
    Event(PushEvent),
    /// Engine session closed.
    Closed,
    /// Nothing to do.
    Ignored,
}

/// Frame decoding failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Frame had no type byte.
    #[error("empty packet")]
    Empty,
    /// Unknown Engine.IO type.
    #[error("unknown engine packet type `{0}`")]
    UnknownEngineType(char),
    /// Unknown Socket.IO type.
    #[error("unknown socket packet type `{0}`")]
    UnknownSocketType(char),
    /// Open packet was not valid JSON.
    #[error("invalid handshake: {0}")]
    Handshake(String),
    /// Packet body was not valid JSON.
    #[error("invalid packet payload: {0}")]
    Payload(String),
    /// Event packet whose first argument is not a name.
    #[error("event packet without a name")]
    MissingEventName,
    /// Known event with a malformed payload.
    #[error(transparent)]
    Event(#[from] EventDecodeError),
}

fn split_type(text: &str) -> Result<(char, &str), PacketError> {
    let kind = text.chars().next().ok_or(PacketError::Empty)?;
    Ok((kind, &text[kind.len_utf8()..]))
}

/// Decode an Engine.IO text frame.
///
/// # Errors
///
/// Returns [`PacketError`] for empty frames, unknown types and bad handshakes.
pub fn decode_engine(text: &str) -> Result<EnginePacket, PacketError> {
    let (kind, rest) = split_type(text)?;
    let packet = match kind {
        '0' => EnginePacket::Open(
            serde_json::from_str(rest).map_err(|err| PacketError::Handshake(err.to_string()))?,
        ),
        '1' => EnginePacket::Close,
        '2' => EnginePacket::Ping(rest.to_string()),
        '3' => EnginePacket::Pong(rest.to_string()),
        '4' => EnginePacket::Message(rest.to_string()),
        '5' => EnginePacket::Upgrade,
        '6' => EnginePacket::Noop,
        other => return Err(PacketError::UnknownEngineType(other)),
    };
    Ok(packet)
}

/// Decode a Socket.IO packet (the body of an engine message).
///
/// # Errors
///
/// Returns [`PacketError`] for empty packets, unknown types and bad JSON.
pub fn decode_socket(text: &str) -> Result<SocketPacket, PacketError> {
    let (kind, mut rest) = split_type(text)?;
    if matches!(kind, '5' | '6') {
        return Ok(SocketPacket::Binary);
    }

    let mut namespace = DEFAULT_NAMESPACE.to_string();
    if rest.starts_with('/') {
        let end = rest.find(',').unwrap_or(rest.len());
        namespace = rest[..end].to_string();
        rest = rest.get(end + 1..).unwrap_or_default();
    }
    let digits = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    let ack = rest[..digits].parse::<u64>().ok();
    let body = &rest[digits..];

    let packet = match kind {
        '0' => SocketPacket::Connect {
            namespace,
            sid: parse_body(body)?
                .as_ref()
                .and_then(|value| value.get("sid"))
                .and_then(Value::as_str)
                .map(ToString::to_string),
        },
        '1' => SocketPacket::Disconnect { namespace },
        '2' => {
            let args: Vec<Value> =
                serde_json::from_str(body).map_err(|err| PacketError::Payload(err.to_string()))?;
            let mut args = args.into_iter();
            let Some(Value::String(name)) = args.next() else {
                return Err(PacketError::MissingEventName);
            };
            SocketPacket::Event {
                namespace,
                ack,
                name,
                args: args.collect(),
            }
        }
        '3' => SocketPacket::Ack { namespace, ack },
        '4' => SocketPacket::ConnectError {
            namespace,
            message: connect_error_message(body),
        },
        other => return Err(PacketError::UnknownSocketType(other)),
    };
    Ok(packet)
}

impl SocketPacket {
    fn is_default_namespace(&self) -> bool {
        match self {
            Self::Connect { namespace, .. }
            | Self::Disconnect { namespace }
            | Self::Event { namespace, .. }
            | Self::Ack { namespace, .. }
            | Self::ConnectError { namespace, .. } => namespace == DEFAULT_NAMESPACE,
            Self::Binary => true,
        }
    }
}

fn parse_body(body: &str) -> Result<Option<Value>, PacketError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|err| PacketError::Payload(err.to_string()))
}

// v5 servers send `{"message": ..}`, v4 servers a bare string.
fn connect_error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => message,
        Ok(value) => value
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), ToString::to_string),
        Err(_) => body.to_string(),
    }
}

/// Decode a frame into the action the socket runner should take.
///
/// # Errors
///
/// Returns [`PacketError`] for malformed frames or known events with bad
/// payloads.
pub fn interpret(text: &str) -> Result<Inbound, PacketError> {
    let inbound = match decode_engine(text)? {
        EnginePacket::Open(handshake) => Inbound::Handshake(handshake),
        EnginePacket::Ping(payload) => Inbound::Ping(payload),
        EnginePacket::Close => Inbound::Closed,
        EnginePacket::Message(body) => match decode_socket(&body)? {
            packet if !packet.is_default_namespace() => Inbound::Ignored,
            SocketPacket::Connect { sid, .. } => Inbound::Joined { sid },
            SocketPacket::Disconnect { .. } => Inbound::Left,
            SocketPacket::ConnectError { message, .. } => Inbound::Rejected(message),
            SocketPacket::Event { name, args, .. } => {
                let payload = args.into_iter().next().unwrap_or(Value::Null);
                PushEvent::from_named(&name, payload)?.map_or(Inbound::Ignored, Inbound::Event)
            }
            SocketPacket::Ack { .. } | SocketPacket::Binary => Inbound::Ignored,
        },
        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Inbound::Ignored,
    };
    Ok(inbound)
}

/// Join request for `namespace`.
#[must_use]
pub fn encode_connect(namespace: &str) -> String {
    if namespace == DEFAULT_NAMESPACE {
        "40".to_string()
    } else {
        format!("40{namespace},")
    }
}

/// Heartbeat answer echoing the ping payload.
#[must_use]
pub fn encode_pong(payload: &str) -> String {
    format!("3{payload}")
}
