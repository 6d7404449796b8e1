//! Game envelope (JSON text frames).
//!
//! Wire shape:
//! `{"type": TAG, "player"?: str, "lobbyId"?: str, "players"?: [str], "message"?: any}`
//!
//! Decoding goes through `serde_json::Value` rather than a derived struct so
//! failures can be classified: broken JSON or a bad `type` is a malformed
//! envelope. The optional fields are lenient: a wrong-typed `player`,
//! `lobbyId` or `players` decodes as absent, and each tag's validation in
//! `inbound` decides whether that field was required.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{HexwireError, Result};
use crate::protocol::tag::MessageType;

/// One message exchanged with the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Message tag (field name is `type` in JSON).
    pub msg_type: MessageType,
    /// Acting or affected player.
    pub player: Option<String>,
    /// Lobby this envelope concerns (`lobbyId` in JSON).
    pub lobby_id: Option<String>,
    /// Ordered player ids.
    pub players: Option<Vec<String>>,
    /// Type-specific payload.
    pub message: Option<Value>,
}

impl Envelope {
    pub fn new(msg_type: MessageType) -> Self {
        Self {
            msg_type,
            player: None,
            lobby_id: None,
            players: None,
            message: None,
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_lobby(mut self, lobby_id: impl Into<String>) -> Self {
        self.lobby_id = Some(lobby_id.into());
        self
    }

    pub fn with_players(mut self, players: Vec<String>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn with_message(mut self, message: Value) -> Self {
        self.message = Some(message);
        self
    }

    /// Look up a field inside `message` (only when `message` is an object).
    pub fn message_field(&self, key: &str) -> Option<&Value> {
        self.message.as_ref()?.as_object()?.get(key)
    }
}

/// Borrowed serialization view; field order here is the wire key order.
#[derive(Serialize)]
struct WireEnvelope<'a> {
    #[serde(rename = "type")]
    msg_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<&'a str>,
    #[serde(rename = "lobbyId", skip_serializing_if = "Option::is_none")]
    lobby_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    players: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a Value>,
}

/// Encode an envelope to compact JSON text.
pub fn encode(env: &Envelope) -> Result<String> {
    let wire = WireEnvelope {
        msg_type: env.msg_type.as_str(),
        player: env.player.as_deref(),
        lobby_id: env.lobby_id.as_deref(),
        players: env.players.as_deref(),
        message: env.message.as_ref(),
    };
    serde_json::to_string(&wire)
        .map_err(|e| HexwireError::Internal(format!("envelope encode failed: {e}")))
}

/// Decode one text frame into an envelope.
///
/// Unknown tags fail with `UnknownType` so the caller can tell them apart
/// from broken frames; whether to report them is the caller's policy.
pub fn decode(text: &str) -> Result<Envelope> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| HexwireError::MalformedEnvelope(format!("invalid envelope json: {e}")))?;

    let Value::Object(mut obj) = value else {
        return Err(HexwireError::MalformedEnvelope(
            "envelope must be a json object".into(),
        ));
    };

    let tag = match obj.remove("type") {
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(HexwireError::MalformedEnvelope(
                "type must be a string".into(),
            ))
        }
        None => return Err(HexwireError::MalformedEnvelope("missing type".into())),
    };
    let msg_type = tag
        .parse::<MessageType>()
        .map_err(|_| HexwireError::UnknownType(tag))?;

    let player = take_string(&mut obj, "player");
    let lobby_id = take_string(&mut obj, "lobbyId");
    let players = take_string_list(&mut obj, "players");
    let message = match obj.remove("message") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    };

    tracing::trace!(msg_type = %msg_type, ignored_fields = obj.len(), "envelope decoded");

    Ok(Envelope {
        msg_type,
        player,
        lobby_id,
        players,
        message,
    })
}

fn take_string(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    match obj.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            tracing::debug!(field = key, value = %other, "non-string field decoded as absent");
            None
        }
    }
}

fn take_string_list(obj: &mut Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = match obj.remove(key)? {
        Value::Array(items) => items,
        Value::Null => return None,
        other => {
            tracing::debug!(field = key, value = %other, "non-array field decoded as absent");
            return None;
        }
    };

    let list = items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect::<Option<Vec<_>>>();
    if list.is_none() {
        tracing::debug!(field = key, "non-string list item, field decoded as absent");
    }
    list
}
