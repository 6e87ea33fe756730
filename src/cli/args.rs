use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

/// Raysurfer CLI - search, upload, vote, and browse cached code snippets
#[derive(Debug, Parser)]
#[command(name = "raysurfer")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Raysurfer API base URL
    #[arg(long, global = true, env = "RAYSURFER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "RAYSURFER_TIMEOUT",
        default_value_t = crate::api::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// API key (defaults to the RAYSURFER_API_KEY environment variable)
    #[arg(long, global = true, hide = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search for cached code snippets matching a task description
    Search(SearchArgs),
    /// Upload code files as a cached execution result
    Upload(UploadArgs),
    /// Vote on a cached code block (upvote or downvote)
    Vote(VoteArgs),
    /// Get proven task patterns from the community registry
    Patterns(PatternsArgs),
    /// Get few-shot examples for a task
    Examples(ExamplesArgs),
    /// Print the CLI version
    Version(VersionArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Task description to search for
    pub task: String,

    /// Maximum number of results
    #[arg(short = 'k', long, default_value_t = 5)]
    pub top_k: u32,

    /// Minimum verdict score threshold
    #[arg(short = 'm', long, default_value_t = 0.0)]
    pub min_score: f64,

    /// Do not prefer complete snippets
    #[arg(long)]
    pub no_prefer_complete: bool,

    /// Display source code for each match
    #[arg(short = 'c', long)]
    pub show_code: bool,

    /// Output raw JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Task description for the uploaded code
    pub task: String,

    /// File path(s) to upload (can be repeated)
    #[arg(short, long = "file", required = true)]
    pub files: Vec<PathBuf>,

    /// Mark the execution as failed
    #[arg(long)]
    pub failed: bool,

    /// Disable automatic upvote
    #[arg(long)]
    pub no_auto_vote: bool,

    /// Output raw JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VoteArgs {
    /// Code block ID to vote on
    pub code_block_id: String,

    /// Upvote (default)
    #[arg(long, overrides_with = "down")]
    pub up: bool,

    /// Downvote
    #[arg(long, overrides_with = "up")]
    pub down: bool,

    /// Task description for context
    #[arg(short, long, default_value = "")]
    pub task: String,

    /// Code block name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Code block description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Output raw JSON
    #[arg(short, long)]
    pub json: bool,
}

impl VoteArgs {
    pub fn is_upvote(&self) -> bool {
        !self.down
    }
}

#[derive(Debug, Clone, Args)]
pub struct PatternsArgs {
    /// Task description to find patterns for
    pub task: String,

    /// Filter by code block ID
    #[arg(long = "id", default_value = "")]
    pub code_block_id: String,

    /// Minimum thumbs-up count
    #[arg(long = "min-up", default_value_t = 1)]
    pub min_thumbs_up: u32,

    /// Maximum number of results
    #[arg(short = 'k', long, default_value_t = 5)]
    pub top_k: u32,

    /// Output raw JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExamplesArgs {
    /// Task description to find examples for
    pub task: String,

    /// Number of examples
    #[arg(short, long, default_value_t = 3)]
    pub k: u32,

    /// Output raw JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VersionArgs {
    /// Output raw JSON
    #[arg(short, long)]
    pub json: bool,
}
