//! # Folder Scanner
//!
//! Recursive audio-file discovery over a [`TreeSource`].
//!
//! ## Overview
//!
//! Walks the subtree under a root folder depth-first in pre-order, visiting
//! each entry exactly once, and collects an [`AudioFileRecord`] for every
//! entry classified as audio. The whole subtree is walked to completion
//! before any result is usable; there is no pagination or early exit.
//!
//! Any error anywhere in the subtree aborts the entire scan with no partial
//! results. An empty result is a successful scan of an empty (or audio-free)
//! root; a missing root is a hard [`ScanError::NotFound`].
//!
//! ## Cycle safety
//!
//! The storage namespace is not trusted to be acyclic. Two guards bound the
//! walk: a visited set keyed on directory location tokens, and a maximum
//! depth. A directory seen twice or past the depth bound is skipped, not an
//! error.

use std::collections::HashSet;
use std::sync::Arc;

use bridge_traits::storage::{FolderRef, TreeSource};
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::classify::{is_audio_file_with, AUDIO_EXTENSIONS, AUDIO_MEDIA_TYPE_PREFIX};
use crate::error::{Result, ScanError};
use crate::records::AudioFileRecord;

/// Scanner configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum directory depth below the root. Subtrees past this bound are
    /// skipped with a warning.
    pub max_depth: usize,
    /// Media-type prefix identifying an audio payload.
    pub audio_media_type_prefix: String,
    /// Recognized audio extensions for the name-based fallback, lowercase and
    /// dot-prefixed.
    pub audio_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            audio_media_type_prefix: AUDIO_MEDIA_TYPE_PREFIX.to_string(),
            audio_extensions: AUDIO_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Depth-first audio-file discovery over a tree source.
pub struct FolderScanner {
    source: Arc<dyn TreeSource>,
    config: ScanConfig,
}

impl FolderScanner {
    pub fn new(source: Arc<dyn TreeSource>, config: ScanConfig) -> Self {
        Self { source, config }
    }

    /// Scan the subtree under `root`, collecting every audio file.
    ///
    /// Blocks (asynchronously) for the duration of the full walk; never run
    /// this on an interactive context. See [`ScanCoordinator`] for the
    /// background-execution wrapper.
    ///
    /// [`ScanCoordinator`]: crate::coordinator::ScanCoordinator
    ///
    /// # Errors
    ///
    /// - [`ScanError::NotFound`] when `root` does not resolve to an existing
    ///   directory
    /// - [`ScanError::Access`] / [`ScanError::Io`] when the source fails
    ///   anywhere in the subtree; partial results are discarded
    pub async fn scan(&self, root: &FolderRef) -> Result<Vec<AudioFileRecord>> {
        self.scan_with_cancel(root, &CancellationToken::new()).await
    }

    /// Like [`scan`](Self::scan), aborting with [`ScanError::Cancelled`] when
    /// the token fires. Cancellation is cooperative, checked per directory.
    pub async fn scan_with_cancel(
        &self,
        root: &FolderRef,
        cancel: &CancellationToken,
    ) -> Result<Vec<AudioFileRecord>> {
        if !self.source.folder_exists(root).await? {
            return Err(ScanError::NotFound(root.token().to_string()));
        }

        let mut records = Vec::new();
        let mut visited = HashSet::new();
        self.scan_folder(root, 0, &mut visited, &mut records, cancel)
            .await?;

        debug!(root = %root, records = records.len(), "Scan walk complete");
        Ok(records)
    }

    fn scan_folder<'a>(
        &'a self,
        folder: &'a FolderRef,
        depth: usize,
        visited: &'a mut HashSet<String>,
        records: &'a mut Vec<AudioFileRecord>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            if depth > self.config.max_depth {
                warn!(folder = %folder, depth, "Depth bound reached, skipping subtree");
                return Ok(());
            }
            if !visited.insert(folder.token().to_string()) {
                debug!(folder = %folder, "Directory already visited, skipping");
                return Ok(());
            }

            let children = tokio::select! {
                _ = cancel.cancelled() => return Err(ScanError::Cancelled),
                listed = self.source.list_children(folder) => listed?,
            };

            for child in children {
                let metadata = self.source.metadata(&child).await?;
                if metadata.is_directory {
                    self.scan_folder(&child.to_folder(), depth + 1, visited, records, cancel)
                        .await?;
                } else if is_audio_file_with(
                    &metadata.name,
                    metadata.media_type.as_deref(),
                    &self.config.audio_media_type_prefix,
                    &self.config.audio_extensions,
                ) {
                    records.push(AudioFileRecord::from_entry(child.token(), &metadata));
                }
            }

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryTreeSource;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::storage::{EntryMetadata, FileRef};
    use bridge_traits::BridgeError;
    use mockall::mock;
    use std::collections::HashSet;

    mock! {
        pub Tree {}

        #[async_trait]
        impl TreeSource for Tree {
            async fn folder_exists(&self, folder: &FolderRef) -> BridgeResult<bool>;
            async fn list_children(&self, folder: &FolderRef) -> BridgeResult<Vec<FileRef>>;
            async fn metadata(&self, entry: &FileRef) -> BridgeResult<EntryMetadata>;
            async fn open_read_stream(
                &self,
                entry: &FileRef,
            ) -> BridgeResult<Box<dyn tokio::io::AsyncRead + Send + Unpin>>;
        }
    }

    fn scanner(source: MemoryTreeSource) -> FolderScanner {
        FolderScanner::new(Arc::new(source), ScanConfig::default())
    }

    #[tokio::test]
    async fn test_mixed_tree_scenario() {
        // root: a.mp3 (no media type), b.txt, sub/ -> c.flac ("audio/flac")
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_file("root", "root/a.mp3", "a.mp3", None, 10);
        source.add_file("root", "root/b.txt", "b.txt", None, 20);
        source.add_subdir("root", "root/sub", "sub");
        source.add_file("root/sub", "root/sub/c.flac", "c.flac", Some("audio/flac"), 30);

        let records = scanner(source).scan(&FolderRef::new("root")).await.unwrap();

        let tokens: HashSet<&str> = records.iter().map(|r| r.location_token.as_str()).collect();
        assert_eq!(records.len(), 2);
        assert!(tokens.contains("root/a.mp3"));
        assert!(tokens.contains("root/sub/c.flac"));
    }

    #[tokio::test]
    async fn test_non_audio_tree_yields_empty_success() {
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_file("root", "root/a.txt", "a.txt", None, 1);
        source.add_subdir("root", "root/docs", "docs");
        source.add_file("root/docs", "root/docs/b.pdf", "b.pdf", Some("application/pdf"), 2);

        let records = scanner(source).scan(&FolderRef::new("root")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_every_reachable_audio_file_appears_exactly_once() {
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_subdir("root", "root/x", "x");
        source.add_subdir("root", "root/y", "y");
        source.add_subdir("root/x", "root/x/deep", "deep");
        source.add_file("root", "root/1.mp3", "1.mp3", None, 1);
        source.add_file("root/x", "root/x/2.ogg", "2.ogg", None, 2);
        source.add_file("root/x/deep", "root/x/deep/3.wav", "3.wav", None, 3);
        source.add_file("root/y", "root/y/4.aac", "4.aac", None, 4);

        let records = scanner(source).scan(&FolderRef::new("root")).await.unwrap();

        let mut tokens: Vec<&str> = records.iter().map(|r| r.location_token.as_str()).collect();
        tokens.sort_unstable();
        assert_eq!(
            tokens,
            vec!["root/1.mp3", "root/x/2.ogg", "root/x/deep/3.wav", "root/y/4.aac"]
        );
    }

    #[tokio::test]
    async fn test_scan_is_idempotent_on_membership() {
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_file("root", "root/a.m4a", "a.m4a", None, 5);
        source.add_subdir("root", "root/sub", "sub");
        source.add_file("root/sub", "root/sub/b.flac", "b.flac", None, 6);
        let scanner = scanner(source);

        let first = scanner.scan(&FolderRef::new("root")).await.unwrap();
        let second = scanner.scan(&FolderRef::new("root")).await.unwrap();

        let as_set = |records: &[AudioFileRecord]| -> HashSet<String> {
            records.iter().map(|r| r.location_token.clone()).collect()
        };
        assert_eq!(as_set(&first), as_set(&second));
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let source = MemoryTreeSource::new();
        let err = scanner(source)
            .scan(&FolderRef::new("nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::NotFound(token) if token == "nowhere"));
    }

    #[tokio::test]
    async fn test_access_error_in_subdirectory_aborts_whole_scan() {
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_file("root", "root/a.mp3", "a.mp3", None, 1);
        source.add_subdir("root", "root/locked", "locked");
        source.deny("root/locked");

        let err = scanner(source)
            .scan(&FolderRef::new("root"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Access(_)));
    }

    #[tokio::test]
    async fn test_cyclic_namespace_terminates() {
        // root <-> root/loop both list each other
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_subdir("root", "root/loop", "loop");
        source.add_subdir("root/loop", "root", "back");
        source.add_file("root", "root/a.mp3", "a.mp3", None, 1);

        let records = scanner(source).scan(&FolderRef::new("root")).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_depth_bound_skips_instead_of_failing() {
        let mut source = MemoryTreeSource::new();
        source.add_dir("d0");
        source.add_subdir("d0", "d1", "d1");
        source.add_subdir("d1", "d2", "d2");
        source.add_file("d2", "d2/deep.mp3", "deep.mp3", None, 1);
        source.add_file("d0", "d0/top.mp3", "top.mp3", None, 1);

        let config = ScanConfig {
            max_depth: 1,
            ..ScanConfig::default()
        };
        let scanner = FolderScanner::new(Arc::new(source), config);
        let records = scanner.scan(&FolderRef::new("d0")).await.unwrap();

        let tokens: Vec<&str> = records.iter().map(|r| r.location_token.as_str()).collect();
        assert_eq!(tokens, vec!["d0/top.mp3"]);
    }

    #[tokio::test]
    async fn test_configured_extension_list_drives_classification() {
        let mut source = MemoryTreeSource::new();
        source.add_dir("root");
        source.add_file("root", "root/a.opus", "a.opus", None, 1);
        source.add_file("root", "root/b.flac", "b.flac", None, 2);

        let config = ScanConfig {
            audio_extensions: vec![".opus".to_string()],
            ..ScanConfig::default()
        };
        let scanner = FolderScanner::new(Arc::new(source), config);
        let records = scanner.scan(&FolderRef::new("root")).await.unwrap();

        let tokens: Vec<&str> = records.iter().map(|r| r.location_token.as_str()).collect();
        assert_eq!(tokens, vec!["root/a.opus"]);
    }

    #[tokio::test]
    async fn test_root_resolution_failure_via_mock() {
        let mut mock = MockTree::new();
        mock.expect_folder_exists().returning(|_| Ok(false));

        let scanner = FolderScanner::new(Arc::new(mock), ScanConfig::default());
        let err = scanner.scan(&FolderRef::new("gone")).await.unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_metadata_failure_propagates_as_io() {
        let mut mock = MockTree::new();
        mock.expect_folder_exists().returning(|_| Ok(true));
        mock.expect_list_children()
            .returning(|_| Ok(vec![FileRef::new("root/odd")]));
        mock.expect_metadata()
            .returning(|_| Err(BridgeError::OperationFailed("stale handle".to_string())));

        let scanner = FolderScanner::new(Arc::new(mock), ScanConfig::default());
        let err = scanner.scan(&FolderRef::new("root")).await.unwrap_err();
        assert!(matches!(err, ScanError::Io(_)));
    }
}
