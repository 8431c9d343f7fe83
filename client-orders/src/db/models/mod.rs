//! Database record models matching table schemas.
//!
//! Each model struct matches a table created by the SQL migrations and derives
//! `sqlx::FromRow`. Database models are kept separate from the API models in
//! [`crate::api::models`] so storage and wire representations can evolve
//! independently; conversions between the two are explicit `From` impls.
//!
//! - [`clients`]: Client rows and the insert request
//! - [`orders`]: Order rows and the insert request
//!
//! Clients and orders are linked only by `orders.client_id`. There is no object
//! graph between them: related rows are fetched with separate lookups.

pub mod clients;
pub mod orders;
