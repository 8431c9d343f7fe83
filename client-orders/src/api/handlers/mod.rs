//! HTTP request handlers for all API endpoints.
//!
//! Each handler validates its input, opens a unit of work on the pool (a
//! connection for reads, a transaction for writes), calls the repositories in
//! [`crate::db::handlers`] and maps the results into response shapes.
//!
//! - [`clients`]: Client creation, lookup and listing (optionally with orders)
//! - [`orders`]: Order creation and per-client listing
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`], which converts to the matching HTTP
//! status and a JSON body of the form `{"detail": "..."}`.

pub mod clients;
pub mod orders;
