//! Top-level facade crate for hexwire.
//!
//! Re-exports the protocol core and the client library so applications can
//! depend on a single crate.

pub mod core {
    pub use hexwire_core::*;
}

pub mod client {
    pub use hexwire_client::*;
}
