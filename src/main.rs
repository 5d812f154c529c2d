use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seo_page_analyzer::{build_http_client, server, AppState, Config, PageFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    info!("Starting SEO page analyzer");
    info!(
        "Fetch timeout: {}s, default locale: {}",
        config.fetch_timeout.as_secs(),
        config.locale
    );

    let http_client = build_http_client(&config)?;
    let fetcher = PageFetcher::new(http_client, config.fetch_timeout);
    let state = Arc::new(AppState::new(config.clone(), fetcher));

    let app = server::router(state);
    let addr = config.bind_addr();

    match (config.tls_host_cert.as_deref(), config.tls_host_key.as_deref()) {
        (Some(cert_name), Some(key_name)) => {
            let cert_path = config.cert_dir.join(cert_name);
            let key_path = config.cert_dir.join(key_name);
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
                .await
                .with_context(|| format!("Failed to load TLS material from {}", config.cert_dir.display()))?;
            info!("SEO analyzer listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        (None, None) => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("SEO analyzer listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        _ => {
            warn!("TLS_HOST_CERT and TLS_HOST_KEY must both be set to enable inbound TLS. Falling back to HTTP.");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("SEO analyzer listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
