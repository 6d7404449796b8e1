//! Validation of server envelopes into typed inbound events.
//!
//! Each wired tag has its own required fields; a validated `Inbound` carries
//! exactly the typed arguments its handler needs. Tags with no handler map to
//! `Inbound::Unwired` and are not an error.

use serde_json::Value;

use crate::error::{HexwireError, Result};
use crate::protocol::envelope::Envelope;
use crate::protocol::tag::MessageType;

/// A validated inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// The server accepted the connection and assigned a player id.
    ConnectionSuccessful { player_id: String },
    /// A lobby was created for this client.
    LobbyCreated { lobby_id: String },
    /// New board state (`GAME_BOARD_JSON`, `PLACE_SETTLEMENT`, `PLACE_ROAD`).
    BoardUpdate {
        msg_type: MessageType,
        lobby_id: String,
        board: Value,
    },
    /// Server-side error notice; never routed to a success handler.
    ServerError { message: Option<Value> },
    /// Known tag with no handler in this build.
    Unwired(MessageType),
}

impl Inbound {
    /// Validate an envelope against its tag's required fields.
    pub fn from_envelope(env: Envelope) -> Result<Self> {
        match env.msg_type {
            MessageType::ConnectionSuccessful => {
                let player_id = match env.message_field("playerId") {
                    Some(Value::String(s)) if !s.is_empty() => s.clone(),
                    Some(_) => {
                        return Err(HexwireError::invalid_payload(
                            "CONNECTION_SUCCESSFUL message.playerId must be a non-empty string",
                        ))
                    }
                    None => {
                        return Err(HexwireError::invalid_payload(
                            "CONNECTION_SUCCESSFUL requires message.playerId",
                        ))
                    }
                };
                Ok(Inbound::ConnectionSuccessful { player_id })
            }
            MessageType::LobbyCreated => {
                let lobby_id = require_lobby(env.lobby_id, env.msg_type)?;
                Ok(Inbound::LobbyCreated { lobby_id })
            }
            MessageType::GameBoardJson | MessageType::PlaceSettlement | MessageType::PlaceRoad => {
                let lobby_id = require_lobby(env.lobby_id, env.msg_type)?;
                let board = match env.message {
                    Some(board @ Value::Object(_)) => board,
                    Some(_) => {
                        return Err(HexwireError::invalid_payload(format!(
                            "{} message must be an object",
                            env.msg_type
                        )))
                    }
                    None => {
                        return Err(HexwireError::invalid_payload(format!(
                            "{} requires message",
                            env.msg_type
                        )))
                    }
                };
                Ok(Inbound::BoardUpdate {
                    msg_type: env.msg_type,
                    lobby_id,
                    board,
                })
            }
            MessageType::Error => Ok(Inbound::ServerError {
                message: env.message,
            }),
            other => Ok(Inbound::Unwired(other)),
        }
    }
}

fn require_lobby(lobby_id: Option<String>, msg_type: MessageType) -> Result<String> {
    match lobby_id {
        Some(id) if !id.is_empty() => Ok(id),
        Some(_) => Err(HexwireError::invalid_payload(format!(
            "{msg_type} lobbyId must not be empty"
        ))),
        None => Err(HexwireError::invalid_payload(format!(
            "{msg_type} requires a string lobbyId"
        ))),
    }
}
