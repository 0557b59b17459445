use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::{AppError, FetchedFile};
use crate::utils::sanitize_filename;

pub const TRACING_TARGET: &str = "universal_media_downloader::saver";

/// Persists a fetched payload somewhere the user can find it.
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Returns where the file ended up.
    async fn save(&self, file: &FetchedFile) -> Result<PathBuf, AppError>;
}

/// Writes files into a folder, never overwriting an existing file.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Claims `name.ext`, then `name (1).ext`, `name (2).ext`, ... by
    /// creating an empty placeholder, so a name taken by someone else
    /// between the check and the final rename is never clobbered.
    async fn reserve(&self, filename: &str) -> std::io::Result<PathBuf> {
        let (stem, ext) = match filename.rfind('.') {
            Some(idx) if idx > 0 => (&filename[..idx], &filename[idx..]),
            _ => (filename, ""),
        };

        let mut n = 0u32;
        loop {
            let candidate = if n == 0 {
                self.dir.join(filename)
            } else {
                self.dir.join(format!("{} ({}){}", stem, n, ext))
            };

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(_) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(e),
            }
        }
    }

    /// Writes `<path>.part` and renames it onto `path`, removing the partial
    /// file if anything fails.
    async fn write(&self, path: &Path, file: &FetchedFile) -> std::io::Result<()> {
        let partial = partial_path(path);

        let result = async {
            let mut out = tokio::fs::File::create(&partial).await?;
            out.write_all(&file.blob).await?;
            out.sync_all().await?;
            drop(out);
            tokio::fs::rename(&partial, path).await
        }
        .await;

        if result.is_err() {
            let _ = tokio::fs::remove_file(&partial).await;
        }
        result
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, file: &FetchedFile) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                dir = %self.dir.display(),
                error = %e,
                "Failed to create download folder"
            );
            AppError::Save
        })?;

        let path = self
            .reserve(&sanitize_filename(&file.filename))
            .await
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    dir = %self.dir.display(),
                    error = %e,
                    "Failed to claim a file name"
                );
                AppError::Save
            })?;

        if let Err(e) = self.write(&path, file).await {
            // Give the claimed name back
            let _ = tokio::fs::remove_file(&path).await;
            tracing::error!(
                target: TRACING_TARGET,
                path = %path.display(),
                error = %e,
                "Failed to write file"
            );
            return Err(AppError::Save);
        }

        tracing::info!(
            target: TRACING_TARGET,
            path = %path.display(),
            size = file.blob.len(),
            "Saved file"
        );
        Ok(path)
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    PathBuf::from(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn fetched(name: &str, body: &'static [u8]) -> FetchedFile {
        FetchedFile {
            blob: Bytes::from_static(body),
            filename: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_writes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path().join("nested"));

        let path = saver.save(&fetched("song.mp3", b"ID3")).await.unwrap();

        assert_eq!(path, dir.path().join("nested").join("song.mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3");
        assert!(!dir.path().join("nested").join("song.mp3.part").exists());
    }

    #[tokio::test]
    async fn test_save_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());

        let first = saver.save(&fetched("clip.mp4", b"one")).await.unwrap();
        let second = saver.save(&fetched("clip.mp4", b"two")).await.unwrap();
        let third = saver.save(&fetched("clip.mp4", b"three")).await.unwrap();

        assert_eq!(first.file_name().unwrap(), "clip.mp4");
        assert_eq!(second.file_name().unwrap(), "clip (1).mp4");
        assert_eq!(third.file_name().unwrap(), "clip (2).mp4");
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
    }

    #[tokio::test]
    async fn test_save_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());

        let path = saver.save(&fetched("../evil/name.jpg", b"x")).await.unwrap();

        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), "_evil_name.jpg");
    }

    #[tokio::test]
    async fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let saver = DirectorySaver::new(&blocker);
        let err = saver.save(&fetched("a.mp3", b"x")).await.unwrap_err();
        assert_eq!(err, AppError::Save);
    }

    #[tokio::test]
    async fn test_reserved_name_is_not_handed_out_twice() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());

        let first = saver.reserve("clip.mp4").await.unwrap();
        let second = saver.reserve("clip.mp4").await.unwrap();

        assert_eq!(first.file_name().unwrap(), "clip.mp4");
        assert_eq!(second.file_name().unwrap(), "clip (1).mp4");
        assert!(first.exists());
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("inner"), b"keep").unwrap();

        let saver = DirectorySaver::new(dir.path());
        let result = saver.write(&target, &fetched("taken", b"payload")).await;

        assert!(result.is_err());
        assert!(!partial_path(&target).exists());
        assert_eq!(std::fs::read(target.join("inner")).unwrap(), b"keep");
    }
}
