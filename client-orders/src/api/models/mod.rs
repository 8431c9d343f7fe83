//! API request and response data models.
//!
//! These are the shapes exchanged with callers, kept separate from the database
//! records in [`crate::db::models`]. Create requests carry a `validate()` method
//! for the rules serde cannot express; responses are built with explicit `From`
//! conversions from the database records.
//!
//! - [`clients`]: Client creation input, client output and the client-with-orders shape
//! - [`orders`]: Order creation input and order output

pub mod clients;
pub mod orders;

use crate::errors::Error;

/// PostgreSQL text columns cannot store NUL, so it is refused up front.
fn reject_nul(field: &str, value: &str) -> Result<(), Error> {
    if value.contains('\0') {
        return Err(Error::Validation {
            message: format!("{field} must not contain NUL characters"),
        });
    }
    Ok(())
}
