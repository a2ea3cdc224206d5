//! Prospect - administrative dashboard CLI library
//!
//! This library provides the core functionality for the Prospect dashboard
//! client: a typed request layer for the backend REST API, persistent
//! sessions with explicit expiry, screen routing behind a central auth
//! gate, and the entity commands built on top of them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Typed request layer and entity types for the backend REST API
//! - `commands`: Command handlers invoked by the CLI entrypoint
//! - `router`: Central auth gate resolving screens and guarding commands
//! - `session`: Session persistence with explicit expiry
//! - `validation`: Field-local form validation with French messages
//! - `filter`: Case-insensitive substring filtering over entity lists
//! - `screen`: Dashboard tabs and prompt state
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use prospect::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/prospect.yaml", &Default::default())?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod router;
pub mod screen;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{ProspectError, Result};
pub use session::{Session, SessionStore};
