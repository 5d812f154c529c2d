use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{Config, DEFAULT_FETCH_TIMEOUT};
use crate::error::FetchError;

/// Browser-like User-Agent sent with every page request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the shared HTTP client used for page fetches.
pub fn build_http_client(config: &Config) -> anyhow::Result<Client> {
    let mut builder = Client::builder().timeout(config.fetch_timeout);

    if let Some(ca_cert_name) = &config.tls_ca_cert {
        let cert_path = config.cert_dir.join(ca_cert_name);
        let pem = std::fs::read(&cert_path)
            .with_context(|| format!("Failed to read TLS CA certificate at {}", cert_path.display()))?;
        let cert = reqwest::Certificate::from_pem(&pem)
            .with_context(|| format!("Failed to parse TLS CA certificate at {}", cert_path.display()))?;
        info!("Loaded TLS CA certificate from {}", cert_path.display());
        builder = builder.add_root_certificate(cert);
    }

    builder.build().context("Failed to build HTTP client")
}

/// Issues a single GET per page, bounded by a timeout. No retries, no caching.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetch `url` and return the body decoded as text.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!("Fetching {} (timeout {:?})", url, self.timeout);

        let response = self
            .client
            .get(url.as_str())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with HTTP {}", url, status.as_u16());
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url.as_str(), self.timeout, e))?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new(Client::new(), DEFAULT_FETCH_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::get, Router};

    async fn spawn_origin() -> std::net::SocketAddr {
        let app = Router::new()
            .route("/page", get(|| async { "<html><title>Hi</title></html>" }))
            .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
            .route(
                "/ua",
                get(|headers: HeaderMap| async move {
                    headers
                        .get("user-agent")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn url(addr: std::net::SocketAddr, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", addr, path)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let addr = spawn_origin().await;
        let fetcher = PageFetcher::default();
        let body = fetcher.fetch(&url(addr, "/page")).await.unwrap();
        assert_eq!(body, "<html><title>Hi</title></html>");
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let addr = spawn_origin().await;
        let fetcher = PageFetcher::default();
        let seen = fetcher.fetch(&url(addr, "/ua")).await.unwrap();
        assert_eq!(seen, USER_AGENT);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let addr = spawn_origin().await;
        let fetcher = PageFetcher::default();
        match fetcher.fetch(&url(addr, "/missing")).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_error() {
        let addr = spawn_origin().await;
        let fetcher = PageFetcher::new(Client::new(), Duration::from_millis(200));
        match fetcher.fetch(&url(addr, "/slow")).await {
            Err(err @ FetchError::Timeout { .. }) => {
                assert!(err.to_string().contains("timed out after 200ms"), "{}", err);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = PageFetcher::default();
        assert!(fetcher.fetch(&url(addr, "/")).await.is_err());
    }

    #[test]
    fn test_build_http_client_with_missing_ca_fails() {
        let config = Config {
            cert_dir: std::env::temp_dir(),
            tls_ca_cert: Some("definitely-not-here.pem".into()),
            ..Config::default()
        };
        let err = build_http_client(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to read TLS CA certificate"));
    }
}
