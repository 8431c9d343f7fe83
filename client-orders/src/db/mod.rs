//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL,
//! following the Repository pattern.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! # Units of work
//!
//! Every request gets its own unit of work: a pooled connection for reads, a
//! transaction for writes. Repositories borrow it for their lifetime, so all
//! statements in a request share one connection. A transaction that is dropped
//! without `commit()` rolls back, and the connection returns to the pool on drop
//! whether the request succeeded or failed.
//!
//! ```ignore
//! // Writes: a transaction, committed explicitly
//! let mut tx = pool.begin().await?;
//! let client = Clients::new(&mut tx).create(&request).await?;
//! tx.commit().await?;
//!
//! // Reads: a plain pooled connection
//! let mut conn = pool.acquire().await?;
//! let clients = Clients::new(&mut conn).list().await?;
//! ```
//!
//! # Migrations
//!
//! Schema migrations live in `migrations/` and are embedded at compile time. They
//! run at startup through [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
