//! Backend API surface
//!
//! # Module Layout
//!
//! - `types`  -- Entities, request payloads, and route constants
//! - `client` -- Typed HTTP client wrapping every backend call

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::*;
