use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use super::render;
use super::CommandContext;
use crate::api::{UploadFile, UploadRequest, UploadResponse};
use crate::cli::UploadArgs;
use crate::error::CliError;

/// Read one local file for upload.
fn read_upload_file(path: &Path) -> Result<UploadFile, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(UploadFile {
        path: path.display().to_string(),
        content,
    })
}

/// Upload each `--file` as its own execution result.
///
/// All files are read before any request is sent, and responses are only
/// rendered once every upload has succeeded.
pub async fn run_upload(
    ctx: &CommandContext,
    args: &UploadArgs,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let files = args
        .files
        .iter()
        .map(|path| read_upload_file(path))
        .collect::<Result<Vec<_>, _>>()?;

    let requests: Vec<UploadRequest> = files
        .into_iter()
        .map(|file| UploadRequest {
            task: args.task.clone(),
            file_written: file,
            succeeded: !args.failed,
            auto_vote: !args.no_auto_vote,
        })
        .collect();

    let responses = {
        let client = ctx.connect()?;
        let mut responses = Vec::with_capacity(requests.len());
        for request in &requests {
            info!("Uploading {}", request.file_written.path);
            debug!("Upload size: {} bytes", request.file_written.content.len());
            let response = client
                .upload(request)
                .await
                .map_err(CliError::api("Upload"))?;
            responses.push(response);
        }
        responses
    };

    if args.json {
        return render::write_json(out, &responses);
    }

    for (request, response) in requests.iter().zip(&responses) {
        write_result(out, &request.file_written.path, response, requests.len() > 1)?;
    }

    Ok(())
}

fn write_result(
    out: &mut dyn Write,
    path: &str,
    response: &UploadResponse,
    label: bool,
) -> Result<(), CliError> {
    if label {
        write!(out, "{}: ", path)?;
    }

    if response.success {
        writeln!(out, "Uploaded successfully.  {}", response.message)?;
        if !response.code_block_ids.is_empty() {
            writeln!(out, "Code block IDs: {}", response.code_block_ids.join(", "))?;
        }
    } else {
        writeln!(out, "Upload failed.  {}", response.message)?;
    }

    Ok(())
}
