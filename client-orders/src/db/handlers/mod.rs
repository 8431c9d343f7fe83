//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection or transaction and exposes
//! strongly-typed operations over one table, returning models from
//! [`crate::db::models`].
//!
//! - [`Clients`]: Client records, existence checks and eager loading of orders
//! - [`Orders`]: Order records and per-client listings
//!
//! # Common Pattern
//!
//! ```ignore
//! use client_orders::db::handlers::{Clients, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     // Start a transaction
//!     let mut tx = pool.begin().await?;
//!
//!     // Create repository from transaction
//!     let mut repo = Clients::new(&mut tx);
//!     let clients = repo.list().await?;
//!
//!     // Commit, or drop the transaction to roll back
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod orders;
pub mod repository;

pub use clients::Clients;
pub use orders::Orders;
pub use repository::Repository;
