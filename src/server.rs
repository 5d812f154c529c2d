use axum::{
    extract::{Form, Query, State},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::SeoError;
use crate::page::{render_page, PageView};
use crate::types::{AnalysisResult, AnalyzeForm, AnalyzeQuery, HealthResponse};
use crate::validate::validate_url;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

/// Build the router with the JSON API and the form page.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/analyze", get(analyze_handler))
        .route("/analyze_form", post(analyze_form_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn index(State(state): State<Arc<AppState>>, Query(query): Query<LangQuery>) -> Html<String> {
    let locale = state.resolve_locale(query.lang.as_deref());
    Html(render_page(&PageView {
        locale,
        ..PageView::default()
    }))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisResult>, SeoError> {
    let raw = query.url.unwrap_or_default();
    let url = validate_url(&raw).map_err(|e| {
        warn!("Rejected analyze request: {}", e);
        e
    })?;
    let locale = state.resolve_locale(query.lang.as_deref());

    info!("Analyzing {}", url);
    match state.analyze_url(&url, locale).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            warn!("Analysis of {} failed: {}", url, e);
            Err(e)
        }
    }
}

async fn analyze_form_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String> {
    let locale = state.resolve_locale(form.lang.as_deref());

    let url = match validate_url(&form.url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            return Html(render_page(&PageView {
                locale,
                input_url: &form.url,
                error: Some(locale.invalid_url_message()),
                result: None,
            }));
        }
    };

    info!("Analyzing {} (form)", url);
    match state.analyze_url(&url, locale).await {
        Ok(result) => Html(render_page(&PageView {
            locale,
            input_url: url.as_str(),
            error: None,
            result: Some(&result),
        })),
        Err(e) => {
            warn!("Analysis of {} failed: {}", url, e);
            let message = locale.analysis_failed_message(&e.to_string());
            Html(render_page(&PageView {
                locale,
                input_url: url.as_str(),
                error: Some(message.as_str()),
                result: None,
            }))
        }
    }
}
