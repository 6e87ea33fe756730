use std::io::Write;
use tracing::info;

use super::render::{self, Align, Table};
use super::CommandContext;
use crate::api::{PatternsRequest, PatternsResponse};
use crate::cli::PatternsArgs;
use crate::error::CliError;

pub async fn run_patterns(
    ctx: &CommandContext,
    args: &PatternsArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let request = PatternsRequest {
        task: args.task.clone(),
        code_block_id: args.code_block_id.clone(),
        min_thumbs_up: args.min_thumbs_up,
        top_k: args.top_k,
    };

    let response = {
        let client = ctx.connect()?;
        info!("Fetching task patterns for: {}", request.task);
        client
            .patterns(&request)
            .await
            .map_err(CliError::api("Patterns lookup"))?
    };

    if args.json {
        return render::write_json(out, &response);
    }

    if response.patterns.is_empty() {
        writeln!(out, "No patterns found.")?;
        return Ok(());
    }

    pattern_table(&response).write_to(out)?;
    Ok(())
}

fn pattern_table(response: &PatternsResponse) -> Table {
    let mut table = Table::new(&[
        ("#", Align::Left),
        ("Name / ID", Align::Left),
        ("Score", Align::Right),
        ("Votes", Align::Right),
    ]);

    for (idx, pattern) in response.patterns.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            render::name_with_id(pattern.display_name(), pattern.code_block_id()),
            render::score(pattern.combined_score),
            render::votes(pattern.thumbs_up, pattern.thumbs_down),
        ]);
    }

    table
}
