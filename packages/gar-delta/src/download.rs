//! Delta archive download.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use reqwest::blocking::Client;

use crate::error::{DeltaError, Result};
use crate::http::get_checked;

/// Download `url` into `dest`, creating or truncating the file.
///
/// The body is streamed to disk. Returns the number of bytes written. A
/// failed transfer may leave a partial file behind; the next run overwrites
/// it.
pub fn download_archive(client: &Client, url: &str, dest: &Path) -> Result<u64> {
    tracing::info!(url, dest = %dest.display(), "Downloading archive");

    let mut response = get_checked(client, url).map_err(|source| DeltaError::Download {
        url: url.to_string(),
        source,
    })?;

    let write_err = |source: std::io::Error| DeltaError::ArchiveWrite {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut writer = BufWriter::new(File::create(dest).map_err(write_err)?);
    let written = response
        .copy_to(&mut writer)
        .map_err(|source| DeltaError::Download {
            url: url.to_string(),
            source,
        })?;
    writer.flush().map_err(write_err)?;

    tracing::info!(bytes = written, "Archive downloaded");
    Ok(written)
}
