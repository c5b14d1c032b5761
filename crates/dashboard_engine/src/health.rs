use std::time::Duration;

use dashboard_core::catalog::{ServiceDescriptor, DEFAULT_GATEWAY_URL};
use dashboard_logging::{dash_debug, dash_warn};
use futures_util::StreamExt;
use url::Url;

use crate::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Sleep before attempt `n + 1` is `n * backoff_step`.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub retry: RetryPolicy,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            request_timeout: Duration::from_secs(5),
            max_bytes: 64 * 1024,
            retry: RetryPolicy::default(),
        }
    }
}

/// Where each service's health endpoint lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMode {
    /// Every service is checked through `{gateway}/health`.
    #[default]
    SharedGateway,
    /// The gateway host at the service's own port.
    PerServicePort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthEndpoints {
    pub gateway: String,
    pub mode: EndpointMode,
}

impl Default for HealthEndpoints {
    fn default() -> Self {
        Self {
            gateway: DEFAULT_GATEWAY_URL.to_string(),
            mode: EndpointMode::default(),
        }
    }
}

impl HealthEndpoints {
    pub fn url_for(&self, service: &ServiceDescriptor) -> Result<Url, ProbeError> {
        let mut url = Url::parse(self.gateway.trim_end_matches('/'))
            .map_err(|err| ProbeError::InvalidUrl(format!("{}: {err}", self.gateway)))?;
        if self.mode == EndpointMode::PerServicePort {
            url.set_port(Some(service.port))
                .map_err(|()| ProbeError::InvalidUrl(self.gateway.clone()))?;
        }
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}/health"));
        Ok(url)
    }
}

#[async_trait::async_trait]
pub trait HealthProbe: Send + Sync {
    /// One attempt. `Ok` means the service answered 2xx with a JSON body.
    async fn probe(&self, url: &Url) -> Result<(), ProbeError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestHealthProbe {
    settings: HealthSettings,
}

impl ReqwestHealthProbe {
    pub fn new(settings: HealthSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ProbeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ProbeError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl HealthProbe for ReqwestHealthProbe {
    async fn probe(&self, url: &Url) -> Result<(), ProbeError> {
        let client = self.build_client()?;
        let response = client
            .get(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status.as_u16()));
        }

        let max_bytes = self.settings.max_bytes;
        if response
            .content_length()
            .is_some_and(|content_len| content_len > max_bytes)
        {
            return Err(ProbeError::TooLarge { max_bytes });
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ProbeError::TooLarge { max_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice::<serde_json::Value>(&body)
            .map(|_| ())
            .map_err(|err| ProbeError::InvalidBody(err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        return ProbeError::Timeout;
    }
    ProbeError::Network(err.to_string())
}

/// Runs `probe` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of attempts.
pub async fn probe_with_retry(
    probe: &dyn HealthProbe,
    url: &Url,
    policy: RetryPolicy,
) -> Result<(), ProbeError> {
    let mut attempt = 1;
    loop {
        match probe.probe(url).await {
            Ok(()) => return Ok(()),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                dash_debug!("Health probe {url} attempt {attempt} failed: {err}");
                tokio::time::sleep(policy.backoff_step * attempt).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Probes one service end to end and reduces the outcome to up/down.
pub async fn check_service(
    probe: &dyn HealthProbe,
    endpoints: &HealthEndpoints,
    service: &ServiceDescriptor,
    policy: RetryPolicy,
) -> bool {
    let outcome = match endpoints.url_for(service) {
        Ok(url) => probe_with_retry(probe, &url, policy).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(()) => true,
        Err(err) => {
            dash_warn!("Health check failed for {}: {err}", service.name);
            false
        }
    }
}
