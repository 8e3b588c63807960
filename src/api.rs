use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::address;
use crate::chain;
use crate::config::{Config, Credential};
use crate::error::ApiError;
use crate::models::{CheckEnvResponse, VolumeQuery, VolumeResponse};
use crate::upstream::Upstream;

/// Shared across handlers; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Upstream,
}

impl AppState {
    pub fn new(config: Config) -> eyre::Result<Self> {
        let config = Arc::new(config);
        let upstream = Upstream::new(Arc::clone(&config))?;
        Ok(Self { config, upstream })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "DEX volume API running" }))
        .route("/api/check-env", get(check_env))
        .route("/api/volume", get(volume))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(cfg: Config) -> eyre::Result<()> {
    let addr = SocketAddr::new(cfg.bind_addr, cfg.port);
    let app = router(AppState::new(cfg)?);

    info!("API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Reports the `BITQUERY_API_KEY` captured in `Config` when the process started;
/// the environment is not re-read per request.
async fn check_env(State(state): State<AppState>) -> Result<Json<CheckEnvResponse>, ApiError> {
    if state.config.bitquery_api_key == Credential::Unreadable {
        error!("BITQUERY_API_KEY is set but unreadable");
        return Err(ApiError::Environment("BITQUERY_API_KEY is not valid unicode".to_string()));
    }

    Ok(Json(CheckEnvResponse {
        ok: true,
        has_bitquery_env: state.config.bitquery_api_key.is_set(),
    }))
}

async fn volume(
    State(state): State<AppState>,
    query: Result<Query<VolumeQuery>, QueryRejection>,
) -> Result<Json<VolumeResponse>, ApiError> {
    // an undecodable query string (e.g. repeated `address`) is a bad address
    let Query(q) = query.map_err(|e| {
        warn!("Rejected /api/volume query: {}", e);
        ApiError::InvalidAddress
    })?;
    let address = address::normalize(q.address.as_deref())?;
    let chain = chain::resolve(&chain::alias_from_query(q.chain.as_deref()));

    match state.upstream.volume(chain, &address).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("Error in /api/volume for {}: {}", address, e);
            Err(e)
        }
    }
}
