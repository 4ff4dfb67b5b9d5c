//! Storage-Access Abstractions
//!
//! Provides platform-agnostic traits for resolving and enumerating entries in
//! a hierarchical storage namespace.
//!
//! Handles are opaque location tokens rather than assumed POSIX paths, so the
//! same contract covers a plain filesystem on desktop and permission-scoped
//! tree grants (document picker / SAF) on mobile hosts.

use async_trait::async_trait;

use crate::error::Result;

/// Opaque handle to a directory in a hierarchical storage namespace.
///
/// Immutable once obtained. The token must stay valid for the lifetime of the
/// grant that produced it; the core never synthesizes tokens of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderRef {
    token: String,
}

impl FolderRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The opaque location token identifying this directory.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Display for FolderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// Opaque handle to a single entry (file or directory) within the namespace.
///
/// The token must be sufficient to reopen the entry later through the same
/// [`TreeSource`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    token: String,
}

impl FileRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The opaque location token identifying this entry.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Reinterpret this entry as a directory handle.
    ///
    /// Only meaningful when [`EntryMetadata::is_directory`] is true for it.
    pub fn to_folder(&self) -> FolderRef {
        FolderRef::new(self.token.clone())
    }
}

impl std::fmt::Display for FileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

/// Metadata for a single entry, resolved in one round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Display name. May be empty when the source provides none.
    pub name: String,
    /// Declared media type, when the namespace carries one. Plain filesystems
    /// typically declare none.
    pub media_type: Option<String>,
    /// Size in bytes. Zero for directories on sources that don't report one.
    pub size_bytes: u64,
    /// Whether this entry is itself a directory.
    pub is_directory: bool,
}

/// Storage-access collaborator trait.
///
/// Supplies folder/file resolution from opaque location tokens obtained
/// through a host-side grant flow (e.g., a system folder picker). The core
/// only ever reads through this trait; it never owns or caches the handles.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::{FolderRef, TreeSource};
///
/// async fn count_children(source: &dyn TreeSource, root: &FolderRef) -> Result<usize> {
///     Ok(source.list_children(root).await?.len())
/// }
/// ```
#[async_trait]
pub trait TreeSource: Send + Sync {
    /// Check whether the reference resolves to an existing directory.
    ///
    /// Returns `Ok(false)` for entries that exist but are not directories.
    async fn folder_exists(&self, folder: &FolderRef) -> Result<bool>;

    /// Enumerate the immediate children of a directory.
    ///
    /// Order is whatever the underlying namespace returns; callers must not
    /// rely on any particular ordering.
    async fn list_children(&self, folder: &FolderRef) -> Result<Vec<FileRef>>;

    /// Resolve metadata for a single entry.
    async fn metadata(&self, entry: &FileRef) -> Result<EntryMetadata>;

    /// Open an entry's contents for streaming reads.
    ///
    /// This is how a location token held in a scan result is later turned
    /// back into playable bytes.
    async fn open_read_stream(
        &self,
        entry: &FileRef,
    ) -> Result<Box<dyn tokio::io::AsyncRead + Send + Unpin>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_opaque_and_stable() {
        let folder = FolderRef::new("content://tree/primary%3AMusic");
        assert_eq!(folder.token(), "content://tree/primary%3AMusic");
        assert_eq!(folder.to_string(), folder.token());
    }

    #[test]
    fn test_file_ref_reinterprets_as_folder() {
        let entry = FileRef::new("/music/audiobooks");
        let folder = entry.to_folder();
        assert_eq!(folder.token(), entry.token());
    }
}
