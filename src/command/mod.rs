//! Command implementations.
//!
//! Each command gathers its local inputs, builds a request, opens a client
//! for the duration of the call and renders the response to `out`. Errors
//! surface before anything is written.

mod examples;
mod patterns;
pub mod render;
mod search;
mod upload;
mod version;
mod vote;

pub use examples::run_examples;
pub use patterns::run_patterns;
pub use search::run_search;
pub use upload::run_upload;
pub use version::run_version;
pub use vote::run_vote;

use std::io::Write;
use std::time::Duration;

use crate::api::{ClientConfig, RaysurferClient};
use crate::cli::{Cli, Commands};
use crate::error::CliError;

/// Settings every networked command needs.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub config: ClientConfig,
}

impl CommandContext {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = ClientConfig::new()
            .with_base_url(cli.base_url.clone())
            .with_timeout(Duration::from_secs(cli.timeout));
        if let Some(key) = &cli.api_key {
            config = config.with_api_key(key.clone());
        }
        Self { config }
    }

    /// Open a client; it is released when the returned value is dropped.
    pub(crate) fn connect(&self) -> Result<RaysurferClient, CliError> {
        RaysurferClient::new(self.config.clone()).map_err(CliError::Config)
    }
}

/// Run the parsed command line, writing results to `out`.
pub async fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Search(args) => run_search(&ctx, args, out).await,
        Commands::Upload(args) => run_upload(&ctx, args, out).await,
        Commands::Vote(args) => run_vote(&ctx, args, out).await,
        Commands::Patterns(args) => run_patterns(&ctx, args, out).await,
        Commands::Examples(args) => run_examples(&ctx, args, out).await,
        Commands::Version(args) => run_version(args, out),
    }
}
