//! Local player identity.

use std::sync::{PoisonError, RwLock};

use hexwire_core::error::{HexwireError, Result};

/// Source of the local player's id.
pub trait PlayerSession: Send + Sync {
    /// Fails with `SessionUnavailable` until the server has assigned an id.
    fn player_id(&self) -> Result<String>;
}

/// In-memory session holder, filled on `CONNECTION_SUCCESSFUL`.
#[derive(Debug, Default)]
pub struct SessionHolder {
    player_id: RwLock<Option<String>>,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_player_id(&self, player_id: impl Into<String>) {
        *self.player_id.write().unwrap_or_else(PoisonError::into_inner) = Some(player_id.into());
    }

    pub fn clear(&self) {
        *self.player_id.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl PlayerSession for SessionHolder {
    fn player_id(&self) -> Result<String> {
        self.player_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(HexwireError::SessionUnavailable)
    }
}
