//! Request and Response models for the lookup service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies and validating request input.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_key, MAX_KEY_LENGTH};
pub use responses::{
    ClearResponse, DeleteResponse, EntryResponse, HealthResponse, PutResponse, StatsResponse,
};
