//! API request and response models for order endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::reject_nul;
use crate::db::models::orders::Order;
use crate::errors::Error;
use crate::types::{ClientId, OrderId};

/// Request to create a new order for an existing client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderCreate {
    /// The client placing the order; must already exist
    #[schema(value_type = String, format = "uuid")]
    pub client_id: ClientId,
    /// What was ordered
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Non-negative price, as a JSON number or a decimal string
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
}

impl OrderCreate {
    pub fn validate(&self) -> Result<(), Error> {
        reject_nul("name", &self.name)?;
        for (field, value) in [("address", &self.address), ("zip_code", &self.zip_code), ("city", &self.city)] {
            if let Some(value) = value {
                reject_nul(field, value)?;
            }
        }

        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(Error::Validation {
                message: "price must be greater than or equal to 0".to_string(),
            });
        }

        Ok(())
    }
}

/// A persisted order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "uuid")]
    pub client_id: ClientId,
    pub name: String,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at,
            client_id: order.client_id,
            name: order.name,
            address: order.address,
            zip_code: order.zip_code,
            city: order.city,
            price: order.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;
    use uuid::Uuid;

    fn create(name: &str, price: serde_json::Value) -> OrderCreate {
        serde_json::from_value(json!({
            "client_id": Uuid::new_v4(),
            "name": name,
            "price": price,
        }))
        .unwrap()
    }

    #[test]
    fn test_price_accepts_number_or_string() {
        assert_eq!(create("Widget", json!(19.99)).price, Decimal::from_str("19.99").unwrap());
        assert_eq!(create("Widget", json!("19.99")).price, Decimal::from_str("19.99").unwrap());
        assert_eq!(create("Widget", json!(3)).price, Decimal::from(3));
    }

    #[test]
    fn test_price_bounds() {
        assert!(create("Free", json!(0)).validate().is_ok());
        assert!(create("Free", json!("-0")).validate().is_ok());
        assert!(matches!(create("Refund", json!(-1)).validate(), Err(Error::Validation { .. })));
        assert!(matches!(create("Refund", json!("-0.01")).validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_empty_name_accepted() {
        assert!(create("", json!(1)).validate().is_ok());
        assert!(create("   ", json!(1)).validate().is_ok());
    }

    #[test]
    fn test_nul_in_text_fields_rejected() {
        assert!(matches!(create("Wid\0get", json!(1)).validate(), Err(Error::Validation { .. })));

        let mut order = create("Widget", json!(1));
        order.city = Some("Spring\0field".to_string());
        assert!(matches!(order.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let order = create("Widget", json!(1));
        assert!(order.address.is_none() && order.zip_code.is_none() && order.city.is_none());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let response = OrderResponse {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            client_id: Uuid::new_v4(),
            name: "Widget".to_string(),
            address: None,
            zip_code: None,
            city: None,
            price: Decimal::from_str("19.99").unwrap(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["price"], json!(19.99));
        assert!(value["address"].is_null());
    }
}
