//! Config schema types.

use hexwire_core::error::{HexwireError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub server: ServerSection,

    #[serde(default)]
    pub reconnect: ReconnectSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HexwireError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.reconnect.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub url: String,

    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,

    #[serde(default = "default_close_code")]
    pub close_code: u16,
}

impl ServerSection {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outbound_queue: default_outbound_queue(),
            close_code: default_close_code(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(HexwireError::Config(
                "server.url must start with ws:// or wss://".into(),
            ));
        }
        if !(1..=65536).contains(&self.outbound_queue) {
            return Err(HexwireError::Config(
                "server.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        // RFC 6455: clients may send 1000 or an application code.
        if !(self.close_code == 1000 || (3000..=4999).contains(&self.close_code)) {
            return Err(HexwireError::Config(
                "server.close_code must be 1000 or between 3000 and 4999".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconnectSection {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// 0 means retry forever.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ReconnectSection {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ReconnectSection {
    pub fn validate(&self) -> Result<()> {
        if self.initial_delay_ms < 100 {
            return Err(HexwireError::Config(
                "reconnect.initial_delay_ms must be at least 100".into(),
            ));
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(HexwireError::Config(
                "reconnect.max_delay_ms must not be less than initial_delay_ms".into(),
            ));
        }
        if !(self.multiplier >= 1.0 && self.multiplier.is_finite()) {
            return Err(HexwireError::Config(
                "reconnect.multiplier must be a finite number >= 1.0".into(),
            ));
        }
        Ok(())
    }
}

fn default_outbound_queue() -> usize {
    1024
}
fn default_close_code() -> u16 {
    1000
}
fn default_initial_delay_ms() -> u64 {
    1000
}
fn default_max_delay_ms() -> u64 {
    30000
}
fn default_multiplier() -> f64 {
    2.0
}
fn default_max_attempts() -> u32 {
    10
}
