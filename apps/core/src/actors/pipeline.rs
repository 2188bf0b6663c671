use crate::actors::messages::{AppError, PipelineMessage};
use crate::actors::traits::ClassificationPipeline;
use crate::config::RelayConfig;
use crate::models::{ClassificationResponse, ClassifyRequest};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use url::Url;

/// Header carrying the pipeline access token.
const ACCESS_TOKEN_HEADER: &str = "accessToken";
/// Extra time the handle waits beyond the HTTP timeout before giving up on the actor.
const REPLY_GRACE: Duration = Duration::from_secs(5);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the `PipelineActor`.
///
/// Cloneable front for the task that talks to the upstream classification
/// pipeline over HTTP.
#[derive(Clone)]
pub struct PipelineActorHandle {
    sender: mpsc::Sender<PipelineMessage>,
    reply_timeout: Duration,
}

impl PipelineActorHandle {
    /// Spawns the actor for the pipeline described by `config`.
    pub fn new(config: &RelayConfig) -> Result<Self, AppError> {
        let upstream = UpstreamClient::new(
            config.classify_url()?,
            config.health_url()?,
            config.upstream_access_token.clone(),
            config.upstream_timeout(),
        )?;
        Ok(Self::spawn(upstream))
    }

    fn spawn(upstream: UpstreamClient) -> Self {
        let (sender, receiver) = mpsc::channel(64);
        let reply_timeout = upstream.timeout + REPLY_GRACE;
        let actor = PipelineActorRunner { receiver, upstream };
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }
}

#[async_trait]
impl ClassificationPipeline for PipelineActorHandle {
    async fn classify(&self, request: ClassifyRequest) -> Result<ClassificationResponse, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(PipelineMessage::Classify {
                request,
                responder: send,
            })
            .await?;
        timeout(self.reply_timeout, recv).await??
    }

    async fn check_health(&self) -> bool {
        let (send, recv) = oneshot::channel();
        if self
            .sender
            .send(PipelineMessage::CheckHealth { responder: send })
            .await
            .is_err()
        {
            return false;
        }
        matches!(timeout(HEALTH_TIMEOUT + REPLY_GRACE, recv).await, Ok(Ok(true)))
    }
}

// --- Actor Runner (Internal Logic) ---
struct PipelineActorRunner {
    receiver: mpsc::Receiver<PipelineMessage>,
    upstream: UpstreamClient,
}

impl PipelineActorRunner {
    async fn run(mut self) {
        info!(url = %self.upstream.classify_url, "PipelineActor started");

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }

        info!("PipelineActor stopped");
    }

    /// Each request runs in its own task so a slow upstream call does not
    /// hold up the mailbox.
    fn handle_message(&self, msg: PipelineMessage) {
        let upstream = self.upstream.clone();
        match msg {
            PipelineMessage::Classify { request, responder } => {
                tokio::spawn(async move {
                    let result = upstream.classify(&request).await;
                    let _ = responder.send(result);
                });
            }
            PipelineMessage::CheckHealth { responder } => {
                tokio::spawn(async move {
                    let _ = responder.send(upstream.check_health().await);
                });
            }
        }
    }
}

/// HTTP client for the pipeline service.
#[derive(Clone)]
struct UpstreamClient {
    client: Client,
    classify_url: Url,
    health_url: Url,
    access_token: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    fn new(
        classify_url: Url,
        health_url: Url,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            classify_url,
            health_url,
            access_token,
            timeout,
        })
    }

    #[instrument(skip(self, request), fields(chars = request.message.chars().count()))]
    async fn classify(&self, request: &ClassifyRequest) -> Result<ClassificationResponse, AppError> {
        let mut builder = self
            .client
            .post(self.classify_url.clone())
            .header(ACCEPT, "application/json")
            .json(request);
        if let Some(token) = &self.access_token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token);
        }

        let res = builder.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Pipeline request failed");
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = res.bytes().await?;
        let response: ClassificationResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Upstream(format!("Invalid pipeline response: {}", e)))?;
        info!(
            classification = %response.classification,
            upstream_ms = response.processing_time_ms,
            "Pipeline classified message"
        );
        Ok(response)
    }

    async fn check_health(&self) -> bool {
        match self
            .client
            .get(self.health_url.clone())
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                warn!(status = res.status().as_u16(), "Pipeline health check failed");
                false
            }
            Err(e) => {
                warn!("Pipeline unreachable: {}", e);
                false
            }
        }
    }
}
