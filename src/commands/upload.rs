use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reqwest::Url;
use slog::{Logger, debug};

use crate::catalog_client::{CatalogClient, CatalogHttpClient, UploadReceipt};
use crate::commands::SharedArgs;
use crate::configuration::DEFAULT_CATALOG_URL;
use crate::document::{DocumentFile, normalize};
use crate::{CommandContext, StdResult};

/// Clap command to upload a specification document to a catalog
#[derive(Parser, Debug, Clone)]
pub struct UploadCommand {
    /// Path of the OpenAPI specification document to upload (.yaml, .yml or .json)
    #[clap(long)]
    file: PathBuf,

    #[clap(flatten)]
    shared_args: SharedArgs,
}

impl UploadCommand {
    /// Is JSON output enabled
    pub fn is_json_output_enabled(&self) -> bool {
        self.shared_args.json
    }

    /// Main command execution
    pub async fn execute(&self, context: CommandContext) -> StdResult<()> {
        let params = context.config_parameters()?;
        let api_token = params.require("api_token")?;
        let catalog_id = params.require("catalog_id")?;
        let base_url = params.get_or("base_url", DEFAULT_CATALOG_URL);
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("Invalid catalog base url: '{base_url}'"))?;
        let client = CatalogHttpClient::new(base_url, &api_token, context.logger().clone())?;

        let receipt = self
            .upload_document(&client, &catalog_id, context.logger())
            .await?;

        let status = format!(
            "Document '{}' uploaded to catalog '{catalog_id}'.",
            receipt.uploaded_file
        );
        if self.is_json_output_enabled() {
            println!(
                "{}",
                serde_json::json!({
                    "status": status,
                    "uploaded_file": receipt.uploaded_file,
                })
            );
        } else {
            println!("{status}");
        }

        Ok(())
    }

    /// Run the load, normalize and upload stages in sequence. Any stage error
    /// aborts before the next stage runs, so no request is sent for a
    /// document that did not normalize.
    async fn upload_document(
        &self,
        client: &dyn CatalogClient,
        catalog_id: &str,
        logger: &Logger,
    ) -> StdResult<UploadReceipt> {
        let document = DocumentFile::read(&self.file, logger)?;
        let normalized = normalize(&document)?;
        debug!(
            logger,
            "Normalized document '{}' to '{}'", document.file_name, normalized.file_name
        );
        let receipt = client.upload_document(catalog_id, &normalized).await?;
        debug!(logger, "Catalog response: {}", receipt.response_body);

        Ok(receipt)
    }
}
