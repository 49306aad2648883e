use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use client_core::{AdamaClient, SearchBackend};
use serde::Deserialize;
use shared::{
    domain::ServiceRef,
    error::{ApiError, ErrorCode},
};
use tokio::sync::oneshot;
use tracing::{info, warn};
use widget::{AppContext, PageInitializer, Pager};

mod config;

use config::load_settings;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@3.4.1/dist/css/bootstrap.min.css";

#[derive(Clone)]
struct AppState {
    backend: Arc<dyn SearchBackend>,
    service: ServiceRef,
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    length: Option<String>,
    page: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    info!("{}", widget::BANNER);

    let settings = load_settings()?;
    let mut client = AdamaClient::new(&settings.adama_base_url)?;
    if let Some(token) = &settings.adama_token {
        client = client.with_token(token.clone());
    }
    info!(
        adama = %client.base_url(),
        service = %settings.service_ref(),
        "search backend configured"
    );

    let state = AppState {
        backend: Arc::new(client),
        service: settings.service_ref(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "portal listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(host_page))
        .route("/healthz", get(healthz))
        .route("/status", get(upstream_status))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn upstream_status(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    state.backend.status().await.map_err(|e| {
        warn!(status = e.status(), message = e.message(), "upstream status check failed");
        (
            StatusCode::BAD_GATEWAY,
            Json(ApiError::new(ErrorCode::Upstream, e.to_string())),
        )
    })?;
    Ok("ok")
}

/// Anything unusable in the query falls back to the defaults rather than
/// failing the page load.
fn pager_for(query: &PageQuery) -> Pager {
    let mut pager = match query.length.as_deref().map(str::trim) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(length) => Pager::with_length(length).unwrap_or_else(|err| {
                warn!(%err, "falling back to default page length");
                Pager::default()
            }),
            Err(err) => {
                warn!(length = raw, %err, "falling back to default page length");
                Pager::default()
            }
        },
        None => Pager::default(),
    };

    let page = match query.page.as_deref().map(str::trim) {
        Some(raw) => raw.parse::<usize>().unwrap_or_else(|err| {
            warn!(page = raw, %err, "falling back to first page");
            0
        }),
        None => 0,
    };
    pager.set_page(page);
    pager
}

/// One page load: a fresh context, one ready signal, one page lifetime.
async fn host_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let mut ctx = AppContext::new().with_pager(pager_for(&query));
    let page = PageInitializer::new(state.service.clone());

    let (ready_tx, ready_rx) = oneshot::channel();
    if ready_tx.send(()).is_err() {
        warn!("page stopped listening before ready was signalled");
    }

    match page.run(ready_rx, &mut ctx, state.backend.as_ref()).await {
        Ok(page_state) => info!(?page_state, "page lifetime finished"),
        Err(err) => warn!(%err, "page lifetime rejected"),
    }

    Html(host_document(&ctx))
}

fn host_document(ctx: &AppContext) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Araport science apps</title>
<link rel="stylesheet" href="{BOOTSTRAP_CSS}">
</head>
<body>
<div class="container">
{}
</div>
</body>
</html>
"#,
        ctx.to_html()
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
