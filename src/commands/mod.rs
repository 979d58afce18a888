//! Command module
//! This module holds the subcommands that can be used from the CLI.

mod upload;

pub use upload::*;

use clap::{Parser, Subcommand};

use crate::{CommandContext, StdResult};

/// CLI args shared across all commands
#[derive(Parser, Debug, Clone, Copy)]
pub struct SharedArgs {
    /// Enable JSON output for command results
    #[clap(long)]
    pub json: bool,
}

/// Catalog commands
#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// Upload an OpenAPI specification document to a catalog
    #[clap(arg_required_else_help = true)]
    Upload(UploadCommand),
}

impl CatalogCommands {
    /// Execute catalog command
    pub async fn execute(&self, context: CommandContext) -> StdResult<()> {
        match self {
            Self::Upload(cmd) => cmd.execute(context).await,
        }
    }
}
