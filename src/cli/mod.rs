//! Command-line surface.

mod args;

pub use args::{
    Cli, Commands, ExamplesArgs, PatternsArgs, SearchArgs, UploadArgs, VersionArgs, VoteArgs,
};
