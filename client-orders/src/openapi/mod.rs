//! OpenAPI documentation for the Clients & Orders API.
//!
//! The document is served as JSON at `/openapi.json` and rendered with Scalar at
//! `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::clients::create_client,
        api::handlers::clients::list_clients,
        api::handlers::clients::get_client,
        api::handlers::clients::list_clients_with_orders,
        api::handlers::orders::create_order,
        api::handlers::orders::list_orders_by_client,
    ),
    components(
        schemas(
            api::models::clients::ClientCreate,
            api::models::clients::ClientResponse,
            api::models::clients::ClientWithOrdersResponse,
            api::models::orders::OrderCreate,
            api::models::orders::OrderResponse,
        )
    ),
    tags(
        (name = "clients", description = "Create and look up clients. Email addresses are unique across clients."),
        (name = "orders", description = "Create orders for existing clients and list them per client."),
    ),
    info(
        title = "Clients & Orders API",
        description = "Manage clients and the orders they place.

## Errors

Errors carry a human-readable `detail` field:

```json
{ \"detail\": \"Client with ID 550e8400-e29b-41d4-a716-446655440000 not found\" }
```

Duplicate emails return `409` with an additional `resource` field.",
    ),
)]
pub struct ApiDoc;
