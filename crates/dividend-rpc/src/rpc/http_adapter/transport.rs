use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header;

use crate::config::ClientConfig;
use crate::error::{ClientError, RpcError};
use crate::rpc::{Transport, TransportError, TransportRequest, TransportResponse};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// [`Transport`] over a pooled `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
    limiter: Option<DirectRateLimiter>,
}

impl ReqwestTransport {
    /// Build a transport from `config`: timeouts, the optional CA
    /// certificate added as a trusted root, and the optional rate limit.
    pub fn new(config: &ClientConfig) -> Result<Self, RpcError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true);

        if let Some(ca) = config.ca() {
            let pem = std::fs::read(ca).map_err(|e| {
                ClientError::invalid_config(format!(
                    "failed to read CA certificate {}: {e}",
                    ca.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                ClientError::invalid_config(format!(
                    "invalid CA certificate {}: {e}",
                    ca.display()
                ))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().map_err(|e| {
            ClientError::invalid_config(format!("failed to build http client: {e}"))
        })?;

        Ok(Self {
            client,
            limiter: config
                .requests_per_second()
                .map(|limit| RateLimiter::direct(Quota::per_second(limit))),
        })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.wait_for_rate_limit().await;

        let mut builder = self
            .client
            .post(request.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(request.body);
        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.user, Some(&auth.pass));
        }

        let response = builder.send().await?;
        let status = response.status();
        // A response whose body cannot be read is classified like an empty one.
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse { status, body })
    }
}
