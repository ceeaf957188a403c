//! API Module
//!
//! HTTP front end serving a cache engine as a REST API.
//!
//! # Endpoints
//! - `PUT /set` - Bind a value to a key
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Remove a key
//! - `GET /stats` - Counters and capacity accounting
//! - `GET /keys` - Keys in eviction order
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
