//! Zip archive extraction.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{DeltaError, Result};

/// Extract `archive_path` into `dest`, returning the number of files written.
///
/// An existing `dest` is removed recursively first, so nothing from a
/// previous run survives. Entries whose names would escape `dest` are
/// skipped.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let zip_err = |source: zip::result::ZipError| DeltaError::Extraction {
        archive: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(io_err(archive_path))?;
    let mut archive = zip::ZipArchive::new(file).map_err(zip_err)?;

    if dest.exists() {
        tracing::info!(dir = %dest.display(), "Removing previous extraction directory");
        fs::remove_dir_all(dest).map_err(io_err(dest))?;
    }
    fs::create_dir_all(dest).map_err(io_err(dest))?;

    let mut count: usize = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_err)?;

        let Some(entry_path) = entry.enclosed_name() else {
            tracing::warn!(entry = entry.name(), "Skipping archive entry with unsafe path");
            continue;
        };
        let output_path = dest.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(io_err(output_path.as_path()))?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let mut outfile = File::create(&output_path).map_err(io_err(output_path.as_path()))?;
        io::copy(&mut entry, &mut outfile).map_err(io_err(output_path.as_path()))?;
        tracing::debug!(file = %output_path.display(), "Extracted");
        count += 1;
    }

    tracing::info!(files = count, dir = %dest.display(), "Archive extracted");
    Ok(count)
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> DeltaError {
    let path = path.to_path_buf();
    move |source| DeltaError::ExtractionIo { path, source }
}
