use crate::actors::messages::{AppError, RelayMessage};
use crate::actors::pipeline::PipelineActorHandle;
use crate::actors::traits::ClassificationPipeline;
use crate::config::RelayConfig;
use crate::models::{ClassificationResponse, ClassifyRequest};
use crate::normalizer::{normalize_classification, NormalizedResponse};
use crate::rate_limiter::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info, instrument, warn, Instrument, Span};
use uuid::Uuid;
use validator::Validate;

/// Rate limiting bucket shared by requests without a phone number.
const ANONYMOUS_SENDER: &str = "anonymous";
/// How many admitted requests between limiter cleanups.
const PRUNE_EVERY: u64 = 1024;
const REPLY_GRACE: Duration = Duration::from_secs(5);

/// A handle to the `RelayActor`.
///
/// This is the entry point the HTTP layer uses: it gates requests through the
/// rate limiter, sends them to the classification pipeline and normalizes
/// what comes back.
#[derive(Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<RelayMessage>,
    reply_timeout: Duration,
}

impl RelayHandle {
    /// Spawns the relay and its `PipelineActor` from configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, AppError> {
        let pipeline = PipelineActorHandle::new(config)?;
        let limiter = RateLimiter::new(config.rate_limit_requests, config.rate_limit_window());
        Ok(Self::with_pipeline(
            Arc::new(pipeline),
            limiter,
            config.upstream_timeout(),
        ))
    }

    /// Spawns the relay over any pipeline implementation.
    pub fn with_pipeline<P>(pipeline: Arc<P>, limiter: RateLimiter, upstream_timeout: Duration) -> Self
    where
        P: ClassificationPipeline,
    {
        let (sender, receiver) = mpsc::channel(64);
        let actor = RelayRunner {
            receiver,
            pipeline,
            limiter,
            admitted: 0,
        };
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout: upstream_timeout + REPLY_GRACE,
        }
    }

    /// Classifies a message and returns the `{status, message}` envelope.
    #[instrument(skip(self, request), fields(request_id = %Uuid::new_v4()))]
    pub async fn relay(&self, request: ClassifyRequest) -> Result<NormalizedResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = RelayMessage::Relay {
            request,
            span: Span::current(),
            responder: send,
        };
        self.sender.send(msg).await?;
        timeout(self.reply_timeout, recv).await??
    }

    /// Classifies a message and returns the pipeline's envelope as is.
    #[instrument(skip(self, request), fields(request_id = %Uuid::new_v4()))]
    pub async fn classify_full(
        &self,
        request: ClassifyRequest,
    ) -> Result<ClassificationResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = RelayMessage::Forward {
            request,
            span: Span::current(),
            responder: send,
        };
        self.sender.send(msg).await?;
        timeout(self.reply_timeout, recv).await??
    }

    /// Whether the classification pipeline answers its health endpoint.
    pub async fn upstream_healthy(&self) -> bool {
        let (send, recv) = oneshot::channel();
        if self
            .sender
            .send(RelayMessage::CheckUpstream { responder: send })
            .await
            .is_err()
        {
            return false;
        }
        matches!(timeout(self.reply_timeout, recv).await, Ok(Ok(true)))
    }

    /// Stops the relay actor.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(RelayMessage::Shutdown).await;
    }
}

// --- Actor Runner ---
struct RelayRunner<P>
where
    P: ClassificationPipeline,
{
    receiver: mpsc::Receiver<RelayMessage>,
    pipeline: Arc<P>,
    limiter: RateLimiter,
    admitted: u64,
}

impl<P> RelayRunner<P>
where
    P: ClassificationPipeline,
{
    async fn run(mut self) {
        info!("Relay started");
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }
        info!("Relay stopped");
    }

    /// Returns `false` once the relay should stop.
    fn handle_message(&mut self, msg: RelayMessage) -> bool {
        match msg {
            RelayMessage::Relay {
                request,
                span,
                responder,
            } => {
                if let Err(e) = span.in_scope(|| self.admit(&request)) {
                    let _ = responder.send(Err(e));
                    return true;
                }
                let pipeline = Arc::clone(&self.pipeline);
                tokio::spawn(
                    async move {
                        let result = pipeline.classify(request).await.map(|response| {
                            let normalized = normalize_classification(&response);
                            info!(
                                classification = %response.classification,
                                status = ?normalized.status,
                                "Relayed message"
                            );
                            normalized
                        });
                        if let Err(e) = &result {
                            error!("Error relaying message: {}", e);
                        }
                        let _ = responder.send(result);
                    }
                    .instrument(span),
                );
            }
            RelayMessage::Forward {
                request,
                span,
                responder,
            } => {
                if let Err(e) = span.in_scope(|| self.admit(&request)) {
                    let _ = responder.send(Err(e));
                    return true;
                }
                let pipeline = Arc::clone(&self.pipeline);
                tokio::spawn(
                    async move {
                        let result = pipeline.classify(request).await;
                        if let Err(e) = &result {
                            error!("Error forwarding message: {}", e);
                        }
                        let _ = responder.send(result);
                    }
                    .instrument(span),
                );
            }
            RelayMessage::CheckUpstream { responder } => {
                let pipeline = Arc::clone(&self.pipeline);
                tokio::spawn(async move {
                    let _ = responder.send(pipeline.check_health().await);
                });
            }
            RelayMessage::Shutdown => {
                info!("Relay shutting down...");
                return false;
            }
        }
        true
    }

    /// Validates the request and charges it to its sender's rate limit.
    fn admit(&mut self, request: &ClassifyRequest) -> Result<(), AppError> {
        if request.message.trim().is_empty() {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        }
        request.validate()?;

        let sender = request
            .phone_number
            .as_deref()
            .filter(|phone| !phone.is_empty())
            .unwrap_or(ANONYMOUS_SENDER);

        self.admitted += 1;
        if self.admitted % PRUNE_EVERY == 0 {
            self.limiter.prune();
        }

        if !self.limiter.check(sender) {
            warn!(sender, "Rate limit exceeded");
            return Err(AppError::RateLimited);
        }
        Ok(())
    }
}
