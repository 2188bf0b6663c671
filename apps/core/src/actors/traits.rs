use crate::actors::messages::AppError;
use crate::models::{ClassificationResponse, ClassifyRequest};
use async_trait::async_trait;

/// Defines the public interface for the upstream classification pipeline.
///
/// The pipeline detects language and subject, translates, classifies intent
/// and runs the matching content handler. The relay only sees its output,
/// so tests can swap in a scripted implementation.
#[async_trait]
pub trait ClassificationPipeline: Send + Sync + 'static {
    /// Classifies a query and returns the handler's envelope.
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResponse, AppError>;

    /// Whether the pipeline currently answers its health endpoint.
    async fn check_health(&self) -> bool;
}
