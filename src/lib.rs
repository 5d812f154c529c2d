pub mod analyzer;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod locale;
pub mod page;
pub mod server;
pub mod types;
pub mod validate;

use tracing::{error, info};
use url::Url;

pub use analyzer::{analyze, analyze_with, length_score, ScoringThresholds};
pub use config::Config;
pub use error::{FetchError, SeoError};
pub use fetcher::{build_http_client, PageFetcher};
pub use locale::Locale;
pub use types::*;
pub use validate::validate_url;

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub fetcher: PageFetcher,
    pub thresholds: ScoringThresholds,
}

impl AppState {
    pub fn new(config: Config, fetcher: PageFetcher) -> Self {
        Self {
            config,
            fetcher,
            thresholds: ScoringThresholds::default(),
        }
    }

    /// Requested language if recognised, else the configured default.
    pub fn resolve_locale(&self, lang: Option<&str>) -> Locale {
        lang.and_then(Locale::from_tag).unwrap_or(self.config.locale)
    }

    /// Fetch `url` and analyze the returned markup.
    pub async fn analyze_url(&self, url: &Url, locale: Locale) -> Result<AnalysisResult, SeoError> {
        let html = self.fetcher.fetch(url).await?;

        // html5ever parsing is CPU-bound; keep it off the async workers
        let url_string = url.to_string();
        let thresholds = self.thresholds;
        let result = tokio::task::spawn_blocking(move || {
            analyzer::analyze_with(&url_string, &html, &thresholds, locale)
        })
        .await
        .map_err(|e| {
            error!("Analysis worker failed for {}: {}", url, e);
            SeoError::Analysis(e.to_string())
        })?;

        info!(
            "Analyzed {} ({} words, {} suggestions)",
            result.url,
            result.word_count,
            result.basic_suggestions.len()
        );
        Ok(result)
    }
}
