//! Tree Source Implementation using Tokio

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::{EntryMetadata, FileRef, FolderRef, TreeSource},
};
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Tokio-based tree source for plain-filesystem hosts.
///
/// Location tokens are filesystem paths. No media type is declared - local
/// filesystems carry none, so audio classification downstream falls back to
/// the file-name rule.
pub struct FsTreeSource;

impl FsTreeSource {
    pub fn new() -> Self {
        Self
    }

    /// Convert a std::io::Error into a BridgeError, preserving the kinds the
    /// scan core distinguishes.
    fn map_io_error(path: &Path, e: io::Error) -> BridgeError {
        match e.kind() {
            io::ErrorKind::NotFound => BridgeError::NotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                BridgeError::AccessDenied(path.display().to_string())
            }
            _ => BridgeError::Io(e),
        }
    }
}

impl Default for FsTreeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreeSource for FsTreeSource {
    async fn folder_exists(&self, folder: &FolderRef) -> Result<bool> {
        let path = Path::new(folder.token());
        match fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::map_io_error(path, e)),
        }
    }

    async fn list_children(&self, folder: &FolderRef) -> Result<Vec<FileRef>> {
        let path = Path::new(folder.token());
        let mut children = Vec::new();
        let mut read_dir = fs::read_dir(path)
            .await
            .map_err(|e| Self::map_io_error(path, e))?;

        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| Self::map_io_error(path, e))?
        {
            children.push(FileRef::new(entry.path().display().to_string()));
        }

        debug!(path = ?path, count = children.len(), "Listed directory");
        Ok(children)
    }

    async fn metadata(&self, entry: &FileRef) -> Result<EntryMetadata> {
        let path = Path::new(entry.token());
        let metadata = fs::metadata(path)
            .await
            .map_err(|e| Self::map_io_error(path, e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(EntryMetadata {
            name,
            media_type: None,
            size_bytes: if metadata.is_dir() { 0 } else { metadata.len() },
            is_directory: metadata.is_dir(),
        })
    }

    async fn open_read_stream(
        &self,
        entry: &FileRef,
    ) -> Result<Box<dyn tokio::io::AsyncRead + Send + Unpin>> {
        let path = Path::new(entry.token());
        let file = fs::File::open(path)
            .await
            .map_err(|e| Self::map_io_error(path, e))?;
        debug!(path = ?path, "Opened file for reading");
        Ok(Box::new(file))
    }
}
