//! Wire protocol modules.
//!
//! - `tag`: the closed set of envelope `type` values.
//! - `envelope`: JSON envelope and its codec.
//! - `resource`: resource tags and counted resource maps.
//! - `inbound`: per-type validation of server envelopes into typed events.
//!
//! Malformed input is reported as `HexwireError`, never as a panic.

pub mod envelope;
pub mod inbound;
pub mod resource;
pub mod tag;

pub use envelope::{decode, encode, Envelope};
pub use inbound::Inbound;
pub use resource::{Resource, ResourceMap};
pub use tag::MessageType;
