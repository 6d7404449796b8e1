//! Envelope `type` tags.

use std::fmt;
use std::str::FromStr;

/// Every tag the client understands, in both directions.
///
/// `PlaceSettlement` and `PlaceRoad` are sent by the client and echoed back
/// by the server with the updated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageType {
    // server -> client
    ConnectionSuccessful,
    LobbyCreated,
    LobbyUpdated,
    GameBoardJson,
    DiceResult,
    PlayerResources,
    GameWon,
    Error,

    // client -> server
    CreateLobby,
    JoinLobby,
    LeaveLobby,
    SetReady,
    StartGame,
    PlaceSettlement,
    PlaceRoad,
    RollDice,
    BuyDevelopmentCard,
    TradeWithBank,
    DiscardResources,
    CheatAttempt,
}

impl MessageType {
    pub const ALL: [MessageType; 20] = [
        MessageType::ConnectionSuccessful,
        MessageType::LobbyCreated,
        MessageType::LobbyUpdated,
        MessageType::GameBoardJson,
        MessageType::DiceResult,
        MessageType::PlayerResources,
        MessageType::GameWon,
        MessageType::Error,
        MessageType::CreateLobby,
        MessageType::JoinLobby,
        MessageType::LeaveLobby,
        MessageType::SetReady,
        MessageType::StartGame,
        MessageType::PlaceSettlement,
        MessageType::PlaceRoad,
        MessageType::RollDice,
        MessageType::BuyDevelopmentCard,
        MessageType::TradeWithBank,
        MessageType::DiscardResources,
        MessageType::CheatAttempt,
    ];

    /// Wire representation (value of the `type` field).
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::ConnectionSuccessful => "CONNECTION_SUCCESSFUL",
            MessageType::LobbyCreated => "LOBBY_CREATED",
            MessageType::LobbyUpdated => "LOBBY_UPDATED",
            MessageType::GameBoardJson => "GAME_BOARD_JSON",
            MessageType::DiceResult => "DICE_RESULT",
            MessageType::PlayerResources => "PLAYER_RESOURCES",
            MessageType::GameWon => "GAME_WON",
            MessageType::Error => "ERROR",
            MessageType::CreateLobby => "CREATE_LOBBY",
            MessageType::JoinLobby => "JOIN_LOBBY",
            MessageType::LeaveLobby => "LEAVE_LOBBY",
            MessageType::SetReady => "SET_READY",
            MessageType::StartGame => "START_GAME",
            MessageType::PlaceSettlement => "PLACE_SETTLEMENT",
            MessageType::PlaceRoad => "PLACE_ROAD",
            MessageType::RollDice => "ROLL_DICE",
            MessageType::BuyDevelopmentCard => "BUY_DEVELOPMENT_CARD",
            MessageType::TradeWithBank => "TRADE_WITH_BANK",
            MessageType::DiscardResources => "DISCARD_RESOURCES",
            MessageType::CheatAttempt => "CHEAT_ATTEMPT",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl FromStr for MessageType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}
