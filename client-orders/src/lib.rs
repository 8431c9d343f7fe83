//! # client-orders: Clients & Orders API
//!
//! A small HTTP service for managing **clients** and the **orders** they place, backed by
//! PostgreSQL.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum) and all persistence goes
//! through [SQLx](https://github.com/launchbadge/sqlx) against PostgreSQL.
//!
//! The **API layer** ([`api`]) exposes `/clients/*` and `/orders/*`. Request bodies are
//! deserialized into transfer shapes, validated, and handed to the repositories; results are
//! mapped back into response shapes. Every request gets its own unit of work on the pool: a plain
//! connection for reads, a transaction for writes.
//!
//! The **database layer** ([`db`]) uses the repository pattern. `Clients` and `Orders` each wrap a
//! borrowed connection and own every query for their table, including the two non-trivial ones:
//! listing clients with their orders (one batched follow-up query, not one per client) and listing
//! a client's orders behind an existence check.
//!
//! Errors from either layer convert into [`errors::Error`], which renders as a JSON
//! `{"detail": ...}` body with the matching status code.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use client_orders::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = client_orders::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     client_orders::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations are embedded and run automatically on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! client_orders::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use axum::{
    Json, Router,
    http::{HeaderValue, header},
    routing::get,
};
use bon::Builder;
pub use config::Config;
use config::CorsOrigin;
use serde_json::json;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::openapi::ApiDoc;

pub use types::{ClientId, OrderId};

/// Application state shared across all request handlers.
///
/// Holds only the connection pool and the immutable configuration, so cloning it per request
/// is cheap and there is no shared mutable state between requests.
///
/// ```ignore
/// let state = AppState::builder().db(pool).config(config).build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect the pool described by the configuration and bring the schema up to date.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(&config.database.url)
        .await?;

    migrator().run(&pool).await?;

    Ok(pool)
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let allow_origin = if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry a path; Url renders one as "/"
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(vec![header::LOCATION]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to Clients & Orders API. Visit /docs for API documentation."
    }))
}

/// Build the application router with all endpoints and middleware.
///
/// Collection routes answer both with and without the trailing slash.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    use api::handlers::{clients, orders};

    let client_collection = get(clients::list_clients).post(clients::create_client);
    let clients_with_orders = get(clients::list_clients_with_orders);
    let order_collection = axum::routing::post(orders::create_order);

    let api_routes = Router::new()
        .route("/clients", client_collection.clone())
        .route("/clients/", client_collection)
        .route("/clients/with_orders", clients_with_orders.clone())
        .route("/clients/with_orders/", clients_with_orders)
        .route("/clients/{id}", get(clients::get_client))
        .route("/orders", order_collection.clone())
        .route("/orders/", order_collection)
        .route("/orders/by_client/{id}", get(orders::list_orders_by_client))
        .with_state(state.clone());

    let router = Router::new()
        .route("/", get(root))
        .route("/healthz", get(|| async { "OK" }))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance: connect the pool, run migrations, build the router
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting clients & orders API with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::from_parts(config, pool)
    }

    /// Create an application around an existing pool. Migrations are still applied.
    pub async fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;
        Self::from_parts(config, pool)
    }

    fn from_parts(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Serve until `shutdown` resolves, then drain connections, close the pool and flush telemetry
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Clients & Orders API listening on http://{}, docs at http://localhost:{}/docs",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
