//! Test utilities for integration testing
use crate::config::{Config, DatabaseConfig, PoolSettings};
use crate::db::handlers::{Clients, Orders, Repository};
use crate::db::models::{
    clients::{Client, ClientCreateDBRequest},
    orders::{Order, OrderCreateDBRequest},
};
use crate::types::ClientId;
use axum_test::TestServer;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Build the full router around a test pool and wrap it in a [`TestServer`].
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, pool)
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            // The pool is supplied directly; this is never dialled
            url: "postgresql://localhost/client_orders_test".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                ..Default::default()
            },
        },
        ..Default::default()
    }
}

/// Insert an active client with the given email.
pub async fn create_test_client(pool: &PgPool, email: &str) -> Client {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Clients::new(&mut conn);

    repo.create(&ClientCreateDBRequest {
        email: email.to_string(),
        is_active: true,
        user_id: None,
        client_name: Some(format!("Test client {email}")),
    })
    .await
    .expect("Failed to create test client")
}

/// Insert an order priced at 9.99 for an existing client.
pub async fn create_test_order(pool: &PgPool, client_id: ClientId, name: &str) -> Order {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Orders::new(&mut conn);

    repo.create(&OrderCreateDBRequest {
        client_id,
        name: name.to_string(),
        address: None,
        zip_code: None,
        city: None,
        price: Decimal::new(999, 2),
    })
    .await
    .expect("Failed to create test order")
}
