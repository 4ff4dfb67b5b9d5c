//! In-memory tree source for scanner and coordinator tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::storage::{EntryMetadata, FileRef, FolderRef, TreeSource};
use bridge_traits::BridgeError;
use tokio::sync::Notify;

/// Synthetic tree keyed by location tokens.
///
/// Supports injecting an access denial on a specific directory and holding
/// the first listing until notified, for cancellation/concurrency tests.
pub(crate) struct MemoryTreeSource {
    children: HashMap<String, Vec<String>>,
    metadata: HashMap<String, EntryMetadata>,
    denied: HashSet<String>,
    hold_first_listing: Mutex<Option<Arc<Notify>>>,
}

impl MemoryTreeSource {
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            metadata: HashMap::new(),
            denied: HashSet::new(),
            hold_first_listing: Mutex::new(None),
        }
    }

    pub fn add_dir(&mut self, token: &str) {
        self.children.entry(token.to_string()).or_default();
        self.metadata.insert(
            token.to_string(),
            EntryMetadata {
                name: token.rsplit('/').next().unwrap_or(token).to_string(),
                media_type: None,
                size_bytes: 0,
                is_directory: true,
            },
        );
    }

    pub fn add_subdir(&mut self, parent: &str, token: &str, name: &str) {
        self.children.entry(token.to_string()).or_default();
        self.metadata.insert(
            token.to_string(),
            EntryMetadata {
                name: name.to_string(),
                media_type: None,
                size_bytes: 0,
                is_directory: true,
            },
        );
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(token.to_string());
    }

    pub fn add_file(
        &mut self,
        parent: &str,
        token: &str,
        name: &str,
        media_type: Option<&str>,
        size_bytes: u64,
    ) {
        self.metadata.insert(
            token.to_string(),
            EntryMetadata {
                name: name.to_string(),
                media_type: media_type.map(str::to_string),
                size_bytes,
                is_directory: false,
            },
        );
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(token.to_string());
    }

    /// Make listing this directory fail with an access error.
    pub fn deny(&mut self, token: &str) {
        self.denied.insert(token.to_string());
    }

    /// Hold the next `list_children` call until the notify fires.
    pub fn hold_first_listing(&mut self, gate: Arc<Notify>) {
        *self.hold_first_listing.lock().unwrap() = Some(gate);
    }
}

#[async_trait]
impl TreeSource for MemoryTreeSource {
    async fn folder_exists(&self, folder: &FolderRef) -> BridgeResult<bool> {
        Ok(self.children.contains_key(folder.token()))
    }

    async fn list_children(&self, folder: &FolderRef) -> BridgeResult<Vec<FileRef>> {
        let gate = self.hold_first_listing.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.denied.contains(folder.token()) {
            return Err(BridgeError::AccessDenied(folder.token().to_string()));
        }

        match self.children.get(folder.token()) {
            Some(children) => Ok(children.iter().map(|t| FileRef::new(t.as_str())).collect()),
            None => Err(BridgeError::NotFound(folder.token().to_string())),
        }
    }

    async fn metadata(&self, entry: &FileRef) -> BridgeResult<EntryMetadata> {
        self.metadata
            .get(entry.token())
            .cloned()
            .ok_or_else(|| BridgeError::NotFound(entry.token().to_string()))
    }

    async fn open_read_stream(
        &self,
        entry: &FileRef,
    ) -> BridgeResult<Box<dyn tokio::io::AsyncRead + Send + Unpin>> {
        if self.metadata.contains_key(entry.token()) {
            Ok(Box::new(std::io::Cursor::new(Vec::new())))
        } else {
            Err(BridgeError::NotFound(entry.token().to_string()))
        }
    }
}
