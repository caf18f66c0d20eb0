pub mod config;
pub mod fetch;
pub mod models;
pub mod scraping;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::AppConfig;
use fetch::{HttpFetcher, PageFetcher};
use models::{EventDetail, EventsResponse, HealthResponse};

const SITE_TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::London;

/// Router state. The fetcher is handed in rather than created per
/// route so tests can swap in canned pages.
#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[derive(Debug, Deserialize)]
struct EventsQuery {
    date: Option<String>,
    category: Option<String>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Listings backend is running".to_string(),
    })
}

async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    let category = query
        .category
        .unwrap_or_else(|| scraping::DEFAULT_CATEGORY.to_string());
    let date = query
        .date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today);

    let fetcher = state.fetcher.clone();
    let slug = category.clone();
    let day = date.clone();
    let events = match tokio::task::spawn_blocking(move || {
        scraping::run_category(&slug, fetcher.as_ref(), &day)
    })
    .await
    {
        Ok(events) => events,
        Err(err) => {
            tracing::error!("scrape task failed: {err}");
            Vec::new()
        }
    };

    Json(EventsResponse::new(events, category, date))
}

// TODO: look up the listing detail page once event ids are stable
// across requests.
async fn get_event(Path(id): Path<u32>) -> Json<EventDetail> {
    Json(EventDetail::placeholder(id))
}

fn today() -> String {
    Utc::now()
        .with_timezone(&SITE_TIMEZONE)
        .format("%Y-%m-%d")
        .to_string()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/events", get(list_events))
        .route("/api/events/:id", get(get_event))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(&config);
    tracing::info!(
        listings_url = %config.listings_url,
        num_listings = config.num_listings,
        timeout_secs = config.fetch_timeout.as_secs(),
        "listings fetcher configured"
    );
    let app = router(AppState::new(Arc::new(fetcher)));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
