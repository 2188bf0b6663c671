//! Actors
//!
//! - `relay`: gates, forwards and normalizes client requests
//! - `pipeline`: talks to the upstream classification pipeline over HTTP
//! - `messages`: mailbox message types
//! - `traits`: the seam between the relay and the pipeline

pub mod messages;
pub mod pipeline;
pub mod relay;
pub mod traits;

pub use pipeline::PipelineActorHandle;
pub use relay::RelayHandle;
pub use traits::ClassificationPipeline;
