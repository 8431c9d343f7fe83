//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//! - **[`extractors`]**: Custom request extractors
//!
//! # API Structure
//!
//! - **Clients** (`/clients/*`): create, list, get by id, list with embedded orders
//! - **Orders** (`/orders/*`): create, list by client
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The document is served at
//! `/openapi.json` and rendered at `/docs`.

pub mod extractors;
pub mod handlers;
pub mod models;
