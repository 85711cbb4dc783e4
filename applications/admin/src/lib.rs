//! Audiobook Admin
//!
//! Command line administration of audiobooks: configuration loading and the
//! wiring of the SQLite store, object storage and session.

pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::AdminConfig;
pub use error::{AdminError, Result};
