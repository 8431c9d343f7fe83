//! Database models for orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::api::models::orders::OrderCreate;
use crate::types::{ClientId, OrderId};

/// Database model for an order row.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub client_id: ClientId,
    pub name: String,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub price: Decimal,
}

/// Request to insert a new order. The referenced client must already exist.
#[derive(Debug, Clone)]
pub struct OrderCreateDBRequest {
    pub client_id: ClientId,
    pub name: String,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub price: Decimal,
}

impl From<OrderCreate> for OrderCreateDBRequest {
    fn from(create: OrderCreate) -> Self {
        Self {
            client_id: create.client_id,
            name: create.name,
            address: create.address,
            zip_code: create.zip_code,
            city: create.city,
            price: create.price,
        }
    }
}
