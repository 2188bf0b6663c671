//! Classification relay.
//!
//! Receives chat queries, forwards them to the upstream classification
//! pipeline and reduces the handler output to a flat `{status, message}`
//! reply for the messaging client.

pub mod actors;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod rate_limiter;
pub mod telemetry;

#[cfg(test)]
mod tests;
