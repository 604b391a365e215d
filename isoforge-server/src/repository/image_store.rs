//! Image store
//!
//! One directory holds, per job, the progress log (`<isoName>.log`) and, on
//! success, the artifact (`<isoName>`). Each log has exactly one writer (the
//! build tool for that job), so concurrent readers need no locking. This
//! side of the boundary only ever reads.

use std::io;
use std::path::{Path, PathBuf};

use isoforge_core::domain::job;

/// Handle on the image directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the image directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path where the build tool places the finished artifact.
    pub fn artifact_path(&self, iso_name: &str) -> PathBuf {
        self.root.join(iso_name)
    }

    /// Path of the job's progress log.
    pub fn log_path(&self, iso_name: &str) -> PathBuf {
        self.root.join(job::log_file_name(iso_name))
    }

    /// Reads the full log for a job. `Ok(None)` when no log exists yet,
    /// which covers both unknown jobs and jobs whose build tool has not
    /// written its first line.
    pub async fn read_log(&self, iso_name: &str) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(self.log_path(iso_name)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Whether the finished artifact exists on disk.
    pub async fn artifact_exists(&self, iso_name: &str) -> bool {
        tokio::fs::try_exists(self.artifact_path(iso_name))
            .await
            .unwrap_or(false)
    }

    /// Lists every iso name that has a log file, sorted for stable output.
    ///
    /// Job existence is reconstructed entirely from the directory contents,
    /// so a restart loses nothing and nothing can drift out of sync.
    pub async fn list_iso_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(iso_name) = job::iso_name_from_log(file_name) {
                names.push(iso_name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ImageStore {
        ImageStore::new(dir.path())
    }

    #[tokio::test]
    async fn test_read_log_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let log = store.read_log("custom_ubuntu_missing.iso").await.unwrap();
        assert!(log.is_none());
    }

    #[tokio::test]
    async fn test_read_log_returns_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        tokio::fs::write(store.log_path("a.iso"), "10%: starting\n")
            .await
            .unwrap();

        let log = store.read_log("a.iso").await.unwrap();
        assert_eq!(log.as_deref(), Some("10%: starting\n"));
    }

    #[tokio::test]
    async fn test_artifact_exists_reflects_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.artifact_exists("a.iso").await);

        tokio::fs::write(store.artifact_path("a.iso"), b"image")
            .await
            .unwrap();

        assert!(store.artifact_exists("a.iso").await);
    }

    #[tokio::test]
    async fn test_list_iso_names_only_counts_logs() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        tokio::fs::write(store.log_path("b.iso"), "").await.unwrap();
        tokio::fs::write(store.log_path("a.iso"), "").await.unwrap();
        // An artifact without the .log suffix is not a job entry.
        tokio::fs::write(store.artifact_path("c.iso"), b"image")
            .await
            .unwrap();

        let names = store.list_iso_names().await.unwrap();
        assert_eq!(names, vec!["a.iso", "b.iso"]);
    }

    #[tokio::test]
    async fn test_list_iso_names_fails_on_missing_dir() {
        let store = ImageStore::new("/nonexistent/isoforge-test-dir");
        assert!(store.list_iso_names().await.is_err());
    }
}
