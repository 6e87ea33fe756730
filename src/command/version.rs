use serde_json::json;
use std::io::Write;

use super::render;
use crate::api::VERSION;
use crate::cli::VersionArgs;
use crate::error::CliError;

/// Print the CLI version. Purely local; never opens a client.
pub fn run_version(args: &VersionArgs, out: &mut dyn Write) -> Result<(), CliError> {
    if args.json {
        return render::write_json(out, &json!({ "version": VERSION }));
    }

    writeln!(out, "raysurfer-code-caching-cli {}", VERSION)?;
    Ok(())
}
