use tokio::sync::oneshot;
use tracing::Span;

use crate::models::{ClassificationResponse, ClassifyRequest};
use crate::normalizer::NormalizedResponse;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `PipelineActor`.
#[derive(Debug)]
pub enum PipelineMessage {
    /// Forward a query to the upstream classification pipeline.
    Classify {
        request: ClassifyRequest,
        /// A channel to send the upstream envelope back.
        responder: oneshot::Sender<Result<ClassificationResponse, AppError>>,
    },
    /// Probe the upstream health endpoint.
    CheckHealth { responder: oneshot::Sender<bool> },
}

/// Messages that can be sent to the `RelayActor`.
#[derive(Debug)]
pub enum RelayMessage {
    /// Classify a query and reply with the normalized `{status, message}` envelope.
    Relay {
        request: ClassifyRequest,
        /// Span of the originating request, so spawned work logs under it.
        span: Span,
        responder: oneshot::Sender<Result<NormalizedResponse, AppError>>,
    },
    /// Classify a query and reply with the upstream envelope untouched.
    Forward {
        request: ClassifyRequest,
        span: Span,
        responder: oneshot::Sender<Result<ClassificationResponse, AppError>>,
    },
    /// Ask whether the upstream pipeline is reachable.
    CheckUpstream { responder: oneshot::Sender<bool> },
    /// Stop the relay; later requests fail with an actor error.
    Shutdown,
}
