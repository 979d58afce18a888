use std::io::Write;
use std::sync::Arc;
use std::{fs::File, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use config::builder::DefaultState;
use config::{ConfigBuilder, Map, Source, Value, ValueKind};
use slog::{Drain, Fuse, Level, Logger, debug};
use slog_term::Decorator;

use oas_catalog_cli::commands::CatalogCommands;
use oas_catalog_cli::configuration::DEFAULT_CATALOG_URL;
use oas_catalog_cli::{CommandContext, StdResult};

enum LogOutputType {
    StdErr,
    File(String),
}

impl LogOutputType {
    fn get_writer(&self) -> StdResult<Box<dyn Write + Send>> {
        let writer: Box<dyn Write + Send> = match self {
            LogOutputType::StdErr => Box::new(std::io::stderr()),
            LogOutputType::File(filepath) => Box::new(
                File::create(filepath)
                    .with_context(|| format!("Can not create output log file: {}", filepath))?,
            ),
        };

        Ok(writer)
    }
}

#[derive(Parser, Debug, Clone)]
#[clap(name = "oas-catalog")]
#[clap(
    about = "This program normalizes OpenAPI specification documents to JSON and uploads them to a catalog.",
    long_about = None
)]
#[command(version)]
pub struct Args {
    /// Available commands
    #[clap(subcommand)]
    command: CatalogCommands,

    /// Run Mode.
    #[clap(long, env = "RUN_MODE", default_value = "dev")]
    run_mode: String,

    /// Verbosity level (-v=warning, -vv=info, -vvv=debug).
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory where configuration file is located.
    #[clap(long, default_value = "./config")]
    pub config_directory: PathBuf,

    /// Override the catalog service base URL (e.g. to target a staging deployment).
    #[clap(long, env = "CATALOG_BASE_URL")]
    base_url: Option<String>,

    /// API token used as bearer credential for the upload request.
    #[clap(long, env = "CATALOG_API_TOKEN")]
    api_token: Option<String>,

    /// Identifier of the catalog receiving the uploaded document.
    #[clap(long, env = "CATALOG_ID")]
    catalog_id: Option<String>,

    /// Enable JSON output for logs displayed according to verbosity level
    #[clap(long)]
    log_format_json: bool,

    /// Redirect the logs to a file
    #[clap(long, alias("o"))]
    log_output: Option<String>,
}

impl Args {
    pub async fn execute(&self, root_logger: Logger) -> StdResult<()> {
        debug!(
            root_logger,
            "OAS catalog CLI version: {}",
            env!("CARGO_PKG_VERSION")
        );
        debug!(root_logger, "Run Mode: {}", self.run_mode);
        let filename = format!("{}/{}.json", self.config_directory.display(), self.run_mode);
        debug!(root_logger, "Reading configuration file '{filename}'.");
        let config: ConfigBuilder<DefaultState> = config::Config::builder()
            .add_source(config::File::with_name(&filename).required(false))
            .add_source(self.clone())
            .set_default("base_url", DEFAULT_CATALOG_URL)?;
        let context = CommandContext::new(config, root_logger);

        self.command.execute(context).await
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::Error,
            1 => Level::Warning,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    fn get_log_output_type(&self) -> LogOutputType {
        if let Some(output_filepath) = &self.log_output {
            LogOutputType::File(output_filepath.to_string())
        } else {
            LogOutputType::StdErr
        }
    }

    fn wrap_drain<D: Decorator + Send + 'static>(&self, decorator: D) -> Fuse<slog_async::Async> {
        let drain = slog_term::CompactFormat::new(decorator).build().fuse();
        let drain = slog::LevelFilter::new(drain, self.log_level()).fuse();

        slog_async::Async::new(drain).build().fuse()
    }

    fn build_logger(&self) -> StdResult<Logger> {
        let log_output_type = self.get_log_output_type();
        let writer = log_output_type.get_writer()?;

        let drain = if self.log_format_json {
            let drain = slog_bunyan::with_name("oas-catalog", writer)
                .set_pretty(false)
                .build()
                .fuse();
            let drain = slog::LevelFilter::new(drain, self.log_level()).fuse();

            slog_async::Async::new(drain).build().fuse()
        } else {
            match log_output_type {
                LogOutputType::StdErr => self.wrap_drain(slog_term::TermDecorator::new().build()),
                LogOutputType::File(_) => self.wrap_drain(slog_term::PlainDecorator::new(writer)),
            }
        };

        Ok(Logger::root(Arc::new(drain), slog::o!()))
    }
}

impl Source for Args {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
        let mut map = Map::new();
        let namespace = "clap arguments".to_string();

        if let Some(base_url) = self.base_url.clone() {
            map.insert(
                "base_url".to_string(),
                Value::new(Some(&namespace), ValueKind::from(base_url)),
            );
        }
        if let Some(api_token) = self.api_token.clone() {
            map.insert(
                "api_token".to_string(),
                Value::new(Some(&namespace), ValueKind::from(api_token)),
            );
        }
        if let Some(catalog_id) = self.catalog_id.clone() {
            map.insert(
                "catalog_id".to_string(),
                Value::new(Some(&namespace), ValueKind::from(catalog_id)),
            );
        }

        Ok(map)
    }
}

#[tokio::main]
async fn main() -> StdResult<()> {
    let args = Args::parse();
    let logger = args.build_logger()?;

    args.execute(logger).await
}
