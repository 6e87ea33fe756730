use std::io::Write;
use tracing::info;

use super::render;
use super::CommandContext;
use crate::api::VoteRequest;
use crate::cli::VoteArgs;
use crate::error::CliError;

pub async fn run_vote(
    ctx: &CommandContext,
    args: &VoteArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let up = args.is_upvote();
    let request = VoteRequest {
        code_block_id: args.code_block_id.clone(),
        succeeded: up,
        task: args.task.clone(),
        code_block_name: args.name.clone(),
        code_block_description: args.description.clone(),
    };

    let response = {
        let client = ctx.connect()?;
        info!("Voting on {} (up={})", request.code_block_id, up);
        client
            .vote(&request)
            .await
            .map_err(CliError::api("Vote"))?
    };

    if args.json {
        return render::write_json(out, &response);
    }

    if response.success {
        let direction = if up { "thumbs up" } else { "thumbs down" };
        writeln!(
            out,
            "Voted {} on {}.  {}",
            direction, args.code_block_id, response.message
        )?;
    } else {
        writeln!(out, "Vote failed.  {}", response.message)?;
    }

    Ok(())
}
