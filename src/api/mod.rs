//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a value
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Check whether a live entry exists
//! - `DELETE /del/:key` - Remove an entry regardless of references
//! - `GET /ref/:key` - Current reference count
//! - `POST /ref/:key/increment` - Register a consumer
//! - `POST /ref/:key/decrement` - Drop a consumer
//! - `POST /evict` - Release every entry
//! - `GET /entries` - List live entries, oldest first
//! - `POST /key` - Derive a key from a set of identifiers
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
