use std::io::Write;
use tracing::info;

use super::render;
use super::CommandContext;
use crate::api::FewShotRequest;
use crate::cli::ExamplesArgs;
use crate::error::CliError;

pub async fn run_examples(
    ctx: &CommandContext,
    args: &ExamplesArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let request = FewShotRequest {
        task: args.task.clone(),
        k: args.k,
    };

    let response = {
        let client = ctx.connect()?;
        info!("Fetching {} few-shot example(s) for: {}", request.k, request.task);
        client
            .few_shot_examples(&request)
            .await
            .map_err(CliError::api("Examples lookup"))?
    };

    if args.json {
        return render::write_json(out, &response);
    }

    if response.examples.is_empty() {
        writeln!(out, "No examples found.")?;
        return Ok(());
    }

    for (idx, example) in response.examples.iter().enumerate() {
        let task = if example.task.is_empty() {
            "untitled"
        } else {
            example.task.as_str()
        };
        let code = if example.code.is_empty() {
            "(no code)"
        } else {
            example.code.as_str()
        };
        let title = format!("Example {} - {}", idx + 1, task);
        render::write_code_panel(out, &title, None, code)?;
    }

    Ok(())
}
