//! HTTP surface of the relay.

pub mod handlers;
pub mod router;

pub use router::{router, AppState};
