//! Main server implementation for the Support System API

use crate::{
    api,
    config::Config,
    error::{Error, Result},
    persistence::Database,
    services::{IdentityService, ProfileService, SupportService},
};
use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Main server structure
pub struct Server {
    config: Arc<Config>,
    app: Router,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Account and credential flows
    pub identity: IdentityService,

    /// Profile flows
    pub profiles: ProfileService,

    /// Support ticket flows
    pub support: SupportService,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing Support System API server");

        let config = Arc::new(config);

        let database = Database::connect(&config.database).await?;

        let identity = IdentityService::new(database.users(), database.sequences());
        let profiles = ProfileService::new(identity.clone(), database.profiles());
        let support = SupportService::new(identity.clone(), database.support());

        let state = AppState {
            config: config.clone(),
            identity,
            profiles,
            support,
        };

        let app = Self::build_router(state)?;

        Ok(Self { config, app })
    }

    /// Build the application router with all routes and middleware
    fn build_router(state: AppState) -> Result<Router> {
        let cors = Self::cors_layer(&state.config.server.cors_origins)?;

        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(state.config.request_timeout()))
            .layer(cors);

        let app = Router::new()
            .route("/", get(api::routes::health::health))
            .nest("/api", api::routes(state.clone()))
            .merge(api::docs_routes())
            .layer(middleware)
            .with_state(state);

        Ok(app)
    }

    fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if origins.iter().any(|o| o == "*") {
            return Ok(cors.allow_origin(Any));
        }

        let parsed = origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| Error::Internal {
                    message: format!("Invalid CORS origin: {origin}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(cors.allow_origin(parsed))
    }

    /// Run the server until shutdown signal
    pub async fn run(self) -> Result<()> {
        let addr = self.config.server.bind_address;

        info!("Starting HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Internal {
                message: format!("Failed to bind to address {addr}: {e}"),
            })?;

        info!("Support System API listening on {}", addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Internal {
                message: format!("Server error: {e}"),
            })?;

        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down");
        },
    }
}
