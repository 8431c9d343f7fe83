//! HTTP handlers for client endpoints.

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::instrument;

use crate::{
    AppState,
    api::{
        extractors::{ValidJson, ValidUuid},
        models::clients::{ClientCreate, ClientResponse, ClientWithOrdersResponse},
    },
    db::{
        handlers::{Clients, Repository},
        models::clients::ClientCreateDBRequest,
    },
    errors::{Error, Result},
};

/// Create a new client.
#[utoipa::path(
    post,
    path = "/clients/",
    tag = "clients",
    summary = "Create client",
    description = "Create a new client. Email addresses must be unique.",
    request_body = ClientCreate,
    responses(
        (status = 201, description = "Client created", body = ClientResponse),
        (status = 409, description = "A client with this email already exists"),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn create_client(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ClientCreate>,
) -> Result<(StatusCode, Json<ClientResponse>)> {
    request.validate()?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut tx);

    let client = repo.create(&ClientCreateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(client.into())))
}

/// List all clients.
#[utoipa::path(
    get,
    path = "/clients/",
    tag = "clients",
    summary = "List clients",
    description = "List all clients, newest first.",
    responses(
        (status = 200, description = "List of clients", body = [ClientResponse]),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    let clients = repo.list().await?;

    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

/// Get a client by ID.
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    summary = "Get client",
    params(
        ("id" = uuid::Uuid, Path, description = "Client ID"),
    ),
    responses(
        (status = 200, description = "Client details", body = ClientResponse),
        (status = 404, description = "Client not found"),
        (status = 422, description = "ID is not a UUID"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn get_client(State(state): State<AppState>, ValidUuid(id): ValidUuid) -> Result<Json<ClientResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(client) => Ok(Json(client.into())),
        None => Err(Error::NotFound {
            resource: "Client".to_string(),
            id: id.to_string(),
        }),
    }
}

/// List all clients with their orders.
#[utoipa::path(
    get,
    path = "/clients/with_orders/",
    tag = "clients",
    summary = "List clients with orders",
    description = "List all clients, newest first, each with its orders embedded. Clients without orders have an empty list.",
    responses(
        (status = 200, description = "Clients with their orders", body = [ClientWithOrdersResponse]),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn list_clients_with_orders(State(state): State<AppState>) -> Result<Json<Vec<ClientWithOrdersResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Clients::new(&mut conn);

    let clients = repo.list_with_orders().await?;

    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_client(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app
            .post("/clients/")
            .json(&json!({ "email": "a@x.com", "is_active": true }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: ClientResponse = response.json();
        assert_eq!(created.email, "a@x.com");
        assert!(created.is_active);
        assert!(created.client_name.is_none());

        let response = app.get(&format!("/clients/{}", created.id)).await;
        response.assert_status_ok();
        let fetched: ClientResponse = response.json();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_client_defaults_to_active(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app
            .post("/clients")
            .json(&json!({ "email": "b@x.com", "client_name": "Bee" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: ClientResponse = response.json();
        assert!(created.is_active);
        assert_eq!(created.client_name.as_deref(), Some("Bee"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_email_conflicts(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        create_test_client(&pool, "dup@x.com").await;

        let response = app.post("/clients/").json(&json!({ "email": "dup@x.com" })).await;

        response.assert_status(StatusCode::CONFLICT);
        response.assert_json(&json!({
            "detail": "A client with this email address already exists",
            "resource": "client"
        }));

        let response = app.get("/clients/").await;
        assert_eq!(response.json::<Vec<ClientResponse>>().len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_client_validation(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.post("/clients/").json(&json!({ "email": "not-an-email" })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let response = app.post("/clients/").json(&json!({ "is_active": true })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.json::<serde_json::Value>()["detail"].is_string());

        let response = app.post("/clients/").json(&json!({ "email": "a@x.com", "is_active": "yes" })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.json::<serde_json::Value>()["detail"].is_string());

        let response = app.post("/clients/").json(&json!({ "email": "a\u{0}b@x.com" })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        response.assert_json(&json!({ "detail": "email must not contain NUL characters" }));

        let response = app.post("/clients/").text("email=a@x.com").await;
        response.assert_status_bad_request();
        assert!(response.json::<serde_json::Value>()["detail"].is_string());

        let response = app.get("/clients/").await;
        assert!(response.json::<Vec<ClientResponse>>().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_unknown_client_is_not_found(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let id = uuid::Uuid::new_v4();

        let response = app.get(&format!("/clients/{id}")).await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "detail": format!("Client with ID {id} not found") }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_client_with_malformed_id(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.get("/clients/not-a-uuid").await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_clients_newest_first(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let response = app.get("/clients/").await;
        response.assert_status_ok();
        assert!(response.json::<Vec<ClientResponse>>().is_empty());

        let older = create_test_client(&pool, "older@x.com").await;
        let newer = create_test_client(&pool, "newer@x.com").await;

        let clients: Vec<ClientResponse> = app.get("/clients").await.json();
        let ids: Vec<_> = clients.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_clients_with_orders(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let buyer = create_test_client(&pool, "buyer@x.com").await;
        let idle = create_test_client(&pool, "idle@x.com").await;
        let order = create_test_order(&pool, buyer.id, "Widget").await;

        let response = app.get("/clients/with_orders/").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        // Newest client first
        assert_eq!(entries[0]["id"], json!(idle.id));
        assert_eq!(entries[0]["orders"], json!([]));

        assert_eq!(entries[1]["id"], json!(buyer.id));
        assert_eq!(entries[1]["email"], "buyer@x.com");
        let orders = entries[1]["orders"].as_array().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["id"], json!(order.id));
        assert_eq!(orders[0]["client_id"], json!(buyer.id));
    }
}
