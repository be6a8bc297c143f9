//! Shared types for the table booking service
//!
//! Domain models, wire DTOs and serde helpers used by the server and by
//! anything that talks to its HTTP API.

pub mod client;
pub mod models;
pub mod response;
pub mod serde_helpers;

// Re-exports
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
