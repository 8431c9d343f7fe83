//! API request and response models for client endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::reject_nul;
use crate::api::models::orders::OrderResponse;
use crate::db::models::clients::{Client, ClientWithOrders};
use crate::errors::Error;
use crate::types::ClientId;

/// Longest email or client name the store accepts.
pub const MAX_FIELD_LENGTH: usize = 255;

fn default_is_active() -> bool {
    true
}

/// Request to create a new client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClientCreate {
    /// Contact email, unique across all clients
    #[schema(example = "a@x.com")]
    pub email: String,
    /// Whether the client is active (defaults to true)
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Optional display name
    #[serde(default)]
    pub client_name: Option<String>,
    /// Optional external user reference
    #[serde(default)]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<Uuid>,
}

impl ClientCreate {
    pub fn validate(&self) -> Result<(), Error> {
        validate_email(&self.email)?;

        if let Some(name) = &self.client_name {
            reject_nul("client_name", name)?;
            if name.chars().count() > MAX_FIELD_LENGTH {
                return Err(Error::Validation {
                    message: format!("client_name must be at most {MAX_FIELD_LENGTH} characters"),
                });
            }
        }

        Ok(())
    }
}

/// Minimal shape check: `local@domain`, one `@`, no whitespace.
fn validate_email(email: &str) -> Result<(), Error> {
    let invalid = |message: &str| {
        Err(Error::Validation {
            message: message.to_string(),
        })
    };

    if email.trim().is_empty() {
        return invalid("email must not be empty");
    }
    if email.chars().count() > MAX_FIELD_LENGTH {
        return invalid("email must be at most 255 characters");
    }
    reject_nul("email", email)?;
    if email.chars().any(char::is_whitespace) {
        return invalid("email must not contain whitespace");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => invalid("email must be a valid email address"),
    }
}

/// A persisted client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ClientId,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub is_active: bool,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<Uuid>,
    pub client_name: Option<String>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            created_at: client.created_at,
            email: client.email,
            is_active: client.is_active,
            user_id: client.user_id,
            client_name: client.client_name,
        }
    }
}

/// A client with all of its orders, newest first. `orders` is always present.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientWithOrdersResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ClientId,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub is_active: bool,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub orders: Vec<OrderResponse>,
}

impl From<ClientWithOrders> for ClientWithOrdersResponse {
    fn from(ClientWithOrders { client, orders }: ClientWithOrders) -> Self {
        Self {
            id: client.id,
            created_at: client.created_at,
            email: client.email,
            is_active: client.is_active,
            user_id: client.user_id,
            client_name: client.client_name,
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(email: &str) -> ClientCreate {
        serde_json::from_value(json!({ "email": email })).unwrap()
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let client = create("a@x.com");
        assert!(client.is_active);
        assert!(client.client_name.is_none());
        assert!(client.user_id.is_none());
    }

    #[test]
    fn test_valid_emails() {
        for email in ["a@x.com", "first.last+tag@sub.example.org", "x@y"] {
            assert!(create(email).validate().is_ok(), "{email} should be accepted");
        }
    }

    #[test]
    fn test_invalid_emails() {
        let too_long = format!("{}@x.com", "a".repeat(250));
        for email in ["", "   ", "no-at-sign", "@x.com", "a@", "a@b@c", "a b@x.com", too_long.as_str()] {
            assert!(
                matches!(create(email).validate(), Err(Error::Validation { .. })),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_client_name_length() {
        let mut client = create("a@x.com");
        client.client_name = Some("n".repeat(MAX_FIELD_LENGTH));
        assert!(client.validate().is_ok());

        client.client_name = Some("n".repeat(MAX_FIELD_LENGTH + 1));
        assert!(matches!(client.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_nul_rejected() {
        assert!(matches!(create("a\0@x.com").validate(), Err(Error::Validation { .. })));

        let mut client = create("a@x.com");
        client.client_name = Some("Ac\0me".to_string());
        assert!(matches!(client.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_missing_email_fails_to_deserialize() {
        assert!(serde_json::from_value::<ClientCreate>(json!({ "is_active": true })).is_err());
    }
}
