//! Atomic filesystem helpers.
//!
//! The persisted stores and the patch executor both rewrite whole files.
//! A plain `write` truncates before it writes, so a crash mid-write would
//! leave a mangled file behind. Writing to a sibling temporary path and
//! renaming over the target makes the replacement all-or-nothing.

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::errors::DomainResult;

/// Atomically replace `path` with `contents`.
///
/// The temporary file is flushed and synced before the rename so the new
/// contents are durable once the rename lands.
pub async fn write_atomic(path: &Path, contents: &str) -> DomainResult<()> {
    let tmp_path = tmp_sibling(path);

    let mut file = fs::File::create(&tmp_path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp_path, path).await?;
    Ok(())
}

/// Write `contents` to `path` and sync before returning.
///
/// Used for backup files, which must be durable before the write they
/// protect against is allowed to proceed.
pub async fn write_durable(path: &Path, contents: &str) -> DomainResult<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}
