//! SQLite persistence for a single record type, the [`Dog`].
//!
//! # Intention
//!
//! - Keep one table (`dogs`) in an embedded SQLite file.
//! - Expose insert-or-replace, list, update-by-id and delete-by-id through
//!   [`DogStore`], which owns the connection and opens it on first use.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here.
//! - No migrations, indexes, or queries beyond primary-key equality.

pub mod config;
pub mod demo;
pub mod dog;
pub mod error;
pub mod schema;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use dog::{Dog, Value};
pub use error::StoreError;
pub use store::DogStore;
