//! Applies a downloaded result to the local filesystem.
//!
//! A single-file task downloads one PDF, a multi-file task a ZIP
//! archive. Compressed files replace the originals (--inplace) or land
//! next to them with a suffix, but only when they actually undercut the
//! original size by the configured margin.

use crate::error::Result;
use crate::utils::{format_file_size, size_reduction_percent};
use crate::{info, logger};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Overwrite originals instead of writing alongside them.
    pub inplace: bool,
    /// Inserted between file stem and extension when not in-place.
    pub suffix: String,
    /// Required size reduction in percent for a compressed file to be
    /// kept at all.
    pub min_size_reduction: u8,
}

/// Insert `suffix` between the file stem and its extension.
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

/// Unpack the downloaded payload and pair each compressed file with its
/// original. Returns the paths that were written.
pub fn apply_result(
    downloaded: &Path,
    originals: &[PathBuf],
    options: &ApplyOptions,
) -> Result<Vec<PathBuf>> {
    let compressed_files = if originals.len() == 1 {
        vec![downloaded.to_path_buf()]
    } else {
        unpack_archive(downloaded)?
    };

    let mut written = Vec::new();

    for (idx, (original, compressed)) in originals.iter().zip(&compressed_files).enumerate() {
        let original_size = fs::metadata(original)?.len();
        let compressed_size = fs::metadata(compressed)?.len();
        let reduction = size_reduction_percent(original_size, compressed_size);
        let counter = if originals.len() > 1 {
            format!("{}: ", idx + 1)
        } else {
            String::new()
        };

        if reduction > options.min_size_reduction as f64 {
            let shown = if logger::is_verbose() {
                original.display().to_string()
            } else {
                original
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| original.display().to_string())
            };
            info!(
                "{counter}'{shown}' is now {}, was {} which is {:.0}% smaller",
                format_file_size(compressed_size),
                format_file_size(original_size),
                reduction
            );

            let target = if options.inplace {
                original.clone()
            } else {
                suffixed_path(original, &options.suffix)
            };
            move_file(compressed, &target)?;
            written.push(target);
        } else {
            let shortfall = if original_size == compressed_size {
                "no".to_string()
            } else {
                format!("only {reduction:.1}%")
            };
            info!("{counter}'{}' {shortfall} smaller than original file. Keeping original.",
                original.display());
            fs::remove_file(compressed)?;
        }
    }

    // drop the archive and anything left over from unpacking
    for leftover in &compressed_files {
        let _ = fs::remove_file(leftover);
    }
    let _ = fs::remove_file(downloaded);

    Ok(written)
}

/// Extract every file entry of the result archive next to it, sorted by
/// name. The server's `{n}-` output prefix keeps this order aligned
/// with the sorted originals.
fn unpack_archive(archive_path: &Path) -> Result<Vec<PathBuf>> {
    let dir = archive_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = fs::File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();

    let mut extracted = Vec::new();
    for name in &names {
        let mut entry = archive.by_name(name)?;
        if entry.is_dir() {
            continue;
        }
        let relative = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => continue, // entry escapes the target dir
        };
        let target = dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        extracted.push(target);
    }

    Ok(extracted)
}

/// Rename, falling back to copy+remove for cross-device moves.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}
