use std::io::Write;
use tracing::info;

use super::render::{self, Align, Table};
use super::CommandContext;
use crate::api::{SearchRequest, SearchResponse};
use crate::cli::SearchArgs;
use crate::error::CliError;

pub async fn run_search(
    ctx: &CommandContext,
    args: &SearchArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let request = SearchRequest {
        task: args.task.clone(),
        top_k: args.top_k,
        min_verdict_score: args.min_score,
        prefer_complete: !args.no_prefer_complete,
    };

    let response = {
        let client = ctx.connect()?;
        info!("Searching for: {}", request.task);
        client
            .search(&request)
            .await
            .map_err(CliError::api("Search"))?
    };

    if args.json {
        return render::write_json(out, &response);
    }

    write_summary(out, &response, args.show_code)
}

fn write_summary(
    out: &mut dyn Write,
    response: &SearchResponse,
    show_code: bool,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Found {} result(s)  |  cache_hit={}  |  namespaces=[{}]",
        response.total_found,
        response.cache_hit,
        response.search_namespaces.join(", ")
    )?;
    writeln!(out)?;

    if response.matches.is_empty() {
        writeln!(out, "No matches.")?;
        return Ok(());
    }

    match_table(response).write_to(out)?;

    if show_code {
        writeln!(out)?;
        for (idx, hit) in response.matches.iter().enumerate() {
            let Some(source) = hit.source() else {
                continue;
            };
            let title = hit
                .display_name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Match #{}", idx + 1));
            let language = hit.display_language().unwrap_or("text");
            render::write_code_panel(out, &title, Some(language), source)?;
        }
    }

    Ok(())
}

fn match_table(response: &SearchResponse) -> Table {
    let mut table = Table::new(&[
        ("#", Align::Left),
        ("Name / ID", Align::Left),
        ("Language", Align::Left),
        ("Score", Align::Right),
        ("Votes", Align::Right),
    ]);

    for (idx, hit) in response.matches.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            render::name_with_id(hit.display_name(), hit.code_block_id()),
            render::truncate(hit.display_language().unwrap_or_default(), render::MAX_CELL_WIDTH),
            render::score(hit.combined_score),
            render::votes(hit.thumbs_up, hit.thumbs_down),
        ]);
    }

    table
}
