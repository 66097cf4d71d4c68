//! Input collection and the end-to-end batch run: collect PDFs, drive
//! the remote task lifecycle, apply the result locally.

use crate::api::{CompressionClient, ProcessOutcome};
use crate::constants::CompressionLevel;
use crate::error::{Result, SqueezeError};
use crate::output::{apply_result, ApplyOptions};
use crate::utils::create_progress_spinner;
use crate::validation::partition_pdf_files;
use crate::{info, verbose, warn};
use glob::glob;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub api_key: String,
    pub level: CompressionLevel,
    pub debug: bool,
    pub apply: ApplyOptions,
}

/// Normalize, deduplicate and sort the raw CLI inputs, expanding each
/// directory into a recursive `*.pdf*` glob beneath it. Returns the
/// PDF list and whatever failed the extension check, both sorted.
pub fn collect_pdf_files(inputs: &[String]) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let normalized: BTreeSet<String> = inputs
        .iter()
        .map(|raw| raw.replace('\\', "/").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in normalized {
        let path = PathBuf::from(&entry);
        if path.is_dir() {
            let pattern = format!("{}/**/*.pdf*", entry.trim_end_matches('/'));
            for matched in glob(&pattern)
                .map_err(|e| SqueezeError::Config(format!("invalid glob pattern: {e}")))?
            {
                match matched {
                    Ok(found) => files.push(found),
                    Err(e) => warn!("Skipping unreadable path: {e}"),
                }
            }
        } else {
            files.push(path);
        }
    }

    let (mut pdfs, mut not_pdfs) = partition_pdf_files(&files);
    pdfs.sort();
    pdfs.dedup();
    not_pdfs.sort();
    not_pdfs.dedup();

    Ok((pdfs, not_pdfs))
}

/// Compress a non-empty batch of PDFs, blocking until done.
pub fn compress_pdfs(pdfs: &[PathBuf], options: &BatchOptions) -> Result<()> {
    let runtime = Runtime::new()
        .map_err(|e| SqueezeError::Runtime(format!("failed to create runtime: {e}")))?;

    runtime.block_on(compress_pdfs_async(pdfs, options))
}

/// One full task lifecycle: authenticate, start, upload, process,
/// download, delete, apply. Strictly sequential, no retries.
pub async fn compress_pdfs_async(pdfs: &[PathBuf], options: &BatchOptions) -> Result<()> {
    if pdfs.is_empty() {
        return Err(SqueezeError::NoInputFiles);
    }

    let mut client = CompressionClient::new(options.api_key.clone(), options.debug);
    client.authenticate().await?;

    let mut task = client.start_task(options.level).await?;
    for pdf in pdfs {
        task.add_file(pdf)?;
    }

    let spinner = create_progress_spinner(&format!("Uploading {} file(s)...", task.file_count()));
    task.upload().await?;

    spinner.set_message("Processing on iLovePDF servers...");
    let outcome = task.process().await?;
    spinner.finish_and_clear();

    match outcome {
        ProcessOutcome::DebugEcho(echo) => {
            info!("🐛 Debug run, nothing was compressed. Parameters the server received:");
            info!("{}", serde_json::to_string_pretty(&echo)?);
            if let Err(e) = task.delete().await {
                verbose!("Could not delete debug task: {e}");
            }
            return Ok(());
        }
        ProcessOutcome::Executed(response) => {
            verbose!(
                "Processed {} file(s) in {} (status: {})",
                response.output_filenumber,
                response.timer,
                response.status
            );
        }
    }

    let download_dir = tempfile::tempdir()?;
    let spinner = create_progress_spinner("Downloading result...");
    let downloaded = task.download(download_dir.path()).await?;
    spinner.finish_and_clear();

    if let Err(e) = task.delete().await {
        warn!("Failed to delete remote task {}: {e}", task.task_id());
    }

    let written = apply_result(&downloaded, pdfs, &options.apply)?;
    task.mark_applied();
    verbose!("Wrote {} compressed file(s)", written.len());

    Ok(())
}
