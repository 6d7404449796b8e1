//! Outbound actions: client intents turned into envelopes.
//!
//! Every action resolves the player id, checks the connection, then sends
//! exactly one envelope. Precondition failures are logged and reported via
//! `SendOutcome`; nothing here returns an error or touches the error sink.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use hexwire_core::protocol::{encode, Envelope, MessageType, Resource, ResourceMap};

use crate::session::PlayerSession;
use crate::transport::OutboundChannel;

/// What happened to an outbound action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// One frame was queued on the connection.
    Sent,
    /// No player id yet; nothing was sent.
    NoSession,
    /// The connection is not open; nothing was sent.
    Offline,
    /// The connection refused the frame (closed or queue full).
    Dropped,
}

impl SendOutcome {
    pub fn is_sent(self) -> bool {
        self == SendOutcome::Sent
    }
}

/// Builds and sends client actions over an injected channel.
#[derive(Clone)]
pub struct ActionSender {
    channel: Arc<dyn OutboundChannel>,
    session: Arc<dyn PlayerSession>,
}

impl ActionSender {
    pub fn new(channel: Arc<dyn OutboundChannel>, session: Arc<dyn PlayerSession>) -> Self {
        Self { channel, session }
    }

    pub fn create_lobby(&self) -> SendOutcome {
        self.submit(MessageType::CreateLobby, Envelope::new)
    }

    pub fn join_lobby(&self, lobby_id: &str) -> SendOutcome {
        self.submit_in(MessageType::JoinLobby, lobby_id, None)
    }

    pub fn leave_lobby(&self, lobby_id: &str) -> SendOutcome {
        self.submit_in(MessageType::LeaveLobby, lobby_id, None)
    }

    /// Toggle the ready flag; the server owns the current value.
    pub fn set_ready(&self, lobby_id: &str) -> SendOutcome {
        self.submit_in(MessageType::SetReady, lobby_id, None)
    }

    pub fn start_game(&self, lobby_id: &str) -> SendOutcome {
        self.submit_in(MessageType::StartGame, lobby_id, None)
    }

    pub fn place_settlement(&self, position_id: u32, lobby_id: &str) -> SendOutcome {
        self.submit_in(
            MessageType::PlaceSettlement,
            lobby_id,
            Some(json!({ "settlementPositionId": position_id })),
        )
    }

    pub fn place_road(&self, road_id: u32, lobby_id: &str) -> SendOutcome {
        self.submit_in(
            MessageType::PlaceRoad,
            lobby_id,
            Some(json!({ "roadId": road_id })),
        )
    }

    pub fn roll_dice(&self, lobby_id: &str) -> SendOutcome {
        self.submit_in(MessageType::RollDice, lobby_id, None)
    }

    pub fn buy_development_card(&self, lobby_id: &str) -> SendOutcome {
        self.submit_in(MessageType::BuyDevelopmentCard, lobby_id, None)
    }

    pub fn trade_with_bank(
        &self,
        lobby_id: &str,
        offered: &ResourceMap,
        target: &ResourceMap,
    ) -> SendOutcome {
        self.submit_in(
            MessageType::TradeWithBank,
            lobby_id,
            Some(json!({
                "offeredResources": offered,
                "targetResources": target,
            })),
        )
    }

    pub fn discard_resources(&self, lobby_id: &str, discard: &ResourceMap) -> SendOutcome {
        self.submit_in(
            MessageType::DiscardResources,
            lobby_id,
            Some(json!({ "discardResources": discard })),
        )
    }

    pub fn cheat_attempt(&self, lobby_id: &str, resource: Resource) -> SendOutcome {
        self.submit_in(
            MessageType::CheatAttempt,
            lobby_id,
            Some(json!({ "resource": resource.as_str() })),
        )
    }

    fn submit_in(
        &self,
        msg_type: MessageType,
        lobby_id: &str,
        message: Option<serde_json::Value>,
    ) -> SendOutcome {
        self.submit(msg_type, |msg_type| {
            let env = Envelope::new(msg_type).with_lobby(lobby_id);
            match message {
                Some(m) => env.with_message(m),
                None => env,
            }
        })
    }

    fn submit<F>(&self, msg_type: MessageType, build: F) -> SendOutcome
    where
        F: FnOnce(MessageType) -> Envelope,
    {
        let player_id = match self.session.player_id() {
            Ok(id) => id,
            Err(e) => {
                debug!(msg_type = %msg_type, error = %e, "action skipped: no player session");
                return SendOutcome::NoSession;
            }
        };

        if !self.channel.is_connected() {
            debug!(msg_type = %msg_type, "action skipped: not connected");
            return SendOutcome::Offline;
        }

        let env = build(msg_type).with_player(player_id);
        let text = match encode(&env) {
            Ok(text) => text,
            Err(e) => {
                warn!(msg_type = %msg_type, error = %e, "action dropped: encode failed");
                return SendOutcome::Dropped;
            }
        };

        if self.channel.send(text) {
            debug!(msg_type = %msg_type, "action sent");
            SendOutcome::Sent
        } else {
            warn!(msg_type = %msg_type, "action dropped by connection");
            SendOutcome::Dropped
        }
    }
}
