//! Library for the `oas-catalog` CLI.
//!
//! The pipeline is a strict three-stage sequence: load a specification
//! document from disk ([document::DocumentFile]), normalize it to JSON
//! ([document::normalize]), then upload it to a catalog
//! ([catalog_client::CatalogHttpClient]).

pub mod catalog_client;
mod command_context;
pub mod commands;
pub mod configuration;
pub mod document;

pub use command_context::CommandContext;

/// Generic error type
pub type StdError = anyhow::Error;

/// Generic result type
pub type StdResult<T> = anyhow::Result<T>;
