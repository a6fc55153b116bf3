//! API Module
//!
//! HTTP handlers and routing for the lookup service.
//!
//! # Endpoints
//! - `GET /entries/:key` - Cached or freshly fetched document
//! - `PUT /entries/:key` - Prime the cache with a document
//! - `DELETE /entries/:key` - Remove a key
//! - `DELETE /entries` - Remove every key
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
