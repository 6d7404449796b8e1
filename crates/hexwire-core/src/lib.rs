//! hexwire core: transport-agnostic protocol primitives and the error surface.
//!
//! This crate defines the wire envelope exchanged with the game server, the
//! closed set of message tags, typed resource payloads, and validation of
//! inbound envelopes into typed events. It carries no runtime or socket
//! dependencies so the client, tests, and tooling can share it.
//!
//! # Panic-free parsing
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `HexwireError`/`Result` so a hostile or
//! buggy server frame can never take the client down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{HexwireError, Result};
