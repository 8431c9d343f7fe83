//! HTTP handlers for order endpoints.

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::instrument;

use crate::{
    AppState,
    api::{
        extractors::{ValidJson, ValidUuid},
        models::orders::{OrderCreate, OrderResponse},
    },
    db::{
        handlers::{Clients, Orders, Repository},
        models::orders::OrderCreateDBRequest,
    },
    errors::{Error, Result},
    types::ClientId,
};

fn client_not_found(id: ClientId) -> Error {
    Error::NotFound {
        resource: "Client".to_string(),
        id: id.to_string(),
    }
}

/// Create a new order.
#[utoipa::path(
    post,
    path = "/orders/",
    tag = "orders",
    summary = "Create order",
    description = "Create an order for an existing client.",
    request_body = OrderCreate,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 404, description = "Client not found"),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<OrderCreate>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    request.validate()?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    // Dropping the transaction on the early return rolls it back
    if !Clients::new(&mut tx).exists(request.client_id).await? {
        return Err(client_not_found(request.client_id));
    }

    let mut repo = Orders::new(&mut tx);
    let order = repo.create(&OrderCreateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// List the orders of a client.
#[utoipa::path(
    get,
    path = "/orders/by_client/{id}",
    tag = "orders",
    summary = "List orders by client",
    description = "List all orders placed by a client, newest first.",
    params(
        ("id" = uuid::Uuid, Path, description = "Client ID"),
    ),
    responses(
        (status = 200, description = "Orders of the client", body = [OrderResponse]),
        (status = 404, description = "Client not found"),
        (status = 422, description = "ID is not a UUID"),
        (status = 500, description = "Internal server error"),
    )
)]
#[instrument(skip_all)]
pub async fn list_orders_by_client(
    State(state): State<AppState>,
    ValidUuid(client_id): ValidUuid,
) -> Result<Json<Vec<OrderResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if !Clients::new(&mut conn).exists(client_id).await? {
        return Err(client_not_found(client_id));
    }

    let orders = Orders::new(&mut conn).list_by_client(client_id).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
