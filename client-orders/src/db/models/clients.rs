//! Database models for clients.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::api::models::clients::ClientCreate;
use crate::db::models::orders::Order;
use crate::types::ClientId;

/// Database model for a client row.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub id: ClientId,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub is_active: bool,
    pub user_id: Option<Uuid>,
    pub client_name: Option<String>,
}

/// A client together with every order it has placed, newest first.
#[derive(Debug, Clone)]
pub struct ClientWithOrders {
    pub client: Client,
    pub orders: Vec<Order>,
}

/// Request to insert a new client. `id` and `created_at` are generated by the store.
#[derive(Debug, Clone)]
pub struct ClientCreateDBRequest {
    pub email: String,
    pub is_active: bool,
    pub user_id: Option<Uuid>,
    pub client_name: Option<String>,
}

impl From<ClientCreate> for ClientCreateDBRequest {
    fn from(create: ClientCreate) -> Self {
        Self {
            email: create.email,
            is_active: create.is_active,
            user_id: create.user_id,
            client_name: create.client_name,
        }
    }
}
