//! Store management.
//!
//! [`StoreManager`] is the component behind the store commands: CRUD against
//! file search stores, and upload-and-poll for local files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use snafu::{ensure, ResultExt, Snafu};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::client::{self, Gemini};
use crate::file_search::FileSearchStore;

/// Sleep between operation status checks. This cadence matches the API's
/// observed rate-limit tolerance; do not shorten it.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Errors from uploading local files into a store
#[derive(Debug, Snafu)]
pub enum UploadError {
    #[snafu(display("cannot read '{}': {source}", path.display()))]
    ReadFile { path: PathBuf, source: io::Error },

    #[snafu(display("cannot read directory '{}': {source}", path.display()))]
    ReadDir { path: PathBuf, source: io::Error },

    #[snafu(display("'{}' is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    #[snafu(display("{source}"))]
    Remote { source: client::Error },
}

/// Outcome counts for a directory batch upload.
///
/// A failure of one file never aborts the batch; it is recorded here and
/// the remaining files are still attempted.
#[derive(Debug, Default)]
pub struct UploadSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// `(file name, error message)` per failed upload
    pub failures: Vec<(String, String)>,
}

impl UploadSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Manager for file search stores and file uploads.
#[derive(Debug, Clone)]
pub struct StoreManager {
    gemini: Gemini,
    store_prefix: String,
}

impl StoreManager {
    pub fn new(gemini: Gemini, store_prefix: impl Into<String>) -> Self {
        Self {
            gemini,
            store_prefix: store_prefix.into(),
        }
    }

    /// Creates a store, defaulting the display name to
    /// `<prefix>-<unix-timestamp>`.
    #[instrument(skip_all, fields(display_name = display_name.as_deref()))]
    pub async fn create(&self, display_name: Option<String>) -> client::Result<FileSearchStore> {
        let display_name = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "{}-{}",
                    self.store_prefix,
                    OffsetDateTime::now_utc().unix_timestamp()
                )
            });
        self.gemini.create_file_search_store(Some(display_name)).await
    }

    /// All stores, in the order the service lists them.
    pub async fn list(&self) -> client::Result<Vec<FileSearchStore>> {
        self.gemini.list_file_search_stores().await
    }

    /// Looks up a store; a missing store is `Ok(None)`, not an error.
    pub async fn get(&self, name: &str) -> client::Result<Option<FileSearchStore>> {
        match self.gemini.get_file_search_store(name).await {
            Ok(store) => Ok(Some(store)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn delete(&self, name: &str, force: bool) -> client::Result<()> {
        self.gemini.delete_file_search_store(name, force).await
    }

    /// Uploads one file and waits for indexing to reach a terminal state.
    ///
    /// Polls every two seconds with no timeout: a hung remote operation
    /// blocks until the process exits.
    #[instrument(skip_all, fields(store.name = store_name, file = %path.display()))]
    pub async fn upload_file(&self, store_name: &str, path: &Path) -> Result<(), UploadError> {
        let data = fs::read(path).context(ReadFileSnafu { path })?;
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let mime_type = mime_guess::from_path(path).first_or_octet_stream();

        let mut operation = self
            .gemini
            .upload_to_file_search_store(store_name, data, display_name, mime_type)
            .await
            .context(RemoteSnafu)?;
        operation
            .wait_until_done(POLL_INTERVAL, None)
            .await
            .context(RemoteSnafu)?;

        Ok(())
    }

    /// Uploads every regular file in `dir`, continuing past per-file
    /// failures, and returns the tally.
    #[instrument(skip_all, fields(store.name = store_name, dir = %dir.display()))]
    pub async fn upload_directory(
        &self,
        store_name: &str,
        dir: &Path,
    ) -> Result<UploadSummary, UploadError> {
        let files = regular_files_in(dir)?;

        let mut summary = UploadSummary::default();
        for path in files {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match self.upload_file(store_name, &path).await {
                Ok(()) => {
                    info!(file = %file_name, "uploaded");
                    summary.succeeded += 1;
                }
                Err(err) => {
                    warn!(file = %file_name, error = %err, "upload failed");
                    summary.failed += 1;
                    summary.failures.push((file_name, err.to_string()));
                }
            }
        }

        Ok(summary)
    }
}

/// Regular files directly under `dir`, sorted by name.
fn regular_files_in(dir: &Path) -> Result<Vec<PathBuf>, UploadError> {
    ensure!(dir.is_dir(), NotADirectorySnafu { path: dir });

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).context(ReadDirSnafu { path: dir })? {
        let entry = entry.context(ReadDirSnafu { path: dir })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_files_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let files = regular_files_in(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn regular_files_rejects_non_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            regular_files_in(&file),
            Err(UploadError::NotADirectory { .. })
        ));
        assert!(matches!(
            regular_files_in(&dir.path().join("missing")),
            Err(UploadError::NotADirectory { .. })
        ));
    }

    #[test]
    fn empty_directory_yields_empty_summary_inputs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(regular_files_in(dir.path()).unwrap().is_empty());

        let summary = UploadSummary::default();
        assert_eq!(summary.total(), 0);
    }
}
