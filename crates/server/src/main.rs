use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog::{ProductRepository, SqliteCatalog, StaticCatalog};
use shared::{
    domain::Product,
    error::{ApiError, ErrorCode},
    protocol::{healthz_route, product_by_handle_route, products_route},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{lookup_product, ApiContext};
use app_state::AppState;
use config::{load_settings, prepare_database_url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let catalog: Arc<dyn ProductRepository> = match settings.catalog_database_url.as_deref() {
        Some(raw_url) => {
            let database_url = prepare_database_url(raw_url)?;
            let catalog = SqliteCatalog::connect(&database_url).await.map_err(|error| {
                error!(
                    %database_url,
                    error = %format!("{error:#}"),
                    "failed to open SQLite catalog; verify the path and permissions"
                );
                error
            })?;
            info!(%database_url, "serving products from sqlite catalog");
            Arc::new(catalog)
        }
        None => {
            info!("serving products from the built-in reference catalog");
            Arc::new(StaticCatalog::reference())
        }
    };

    let state = AppState {
        api: ApiContext::new(catalog),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(healthz_route(), get(healthz))
        .route(product_by_handle_route(), get(http_get_product))
        .route(&format!("{}/", products_route()), get(http_get_product_empty_handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
}

async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    match state.api.catalog.health_check().await {
        Ok(()) => Ok("ok"),
        Err(error) => {
            warn!(error = %format!("{error:#}"), "catalog health check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiError::new(ErrorCode::Internal, "Product catalog is unavailable.")),
            ))
        }
    }
}

async fn http_get_product(
    State(state): State<Arc<AppState>>,
    Path(handle): Path<String>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    respond(&state, &handle).await
}

async fn http_get_product_empty_handle(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    respond(&state, "").await
}

async fn respond(
    state: &AppState,
    handle: &str,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    match lookup_product(&state.api, handle).await {
        Ok(product) => Ok(Json(product)),
        Err(err) => {
            if err.code == ErrorCode::NotFound {
                info!(%handle, "product not found");
            }
            Err((status_for(err.code), Json(err)))
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
