//! Permission Gate Abstraction
//!
//! Gates whether the storage-access collaborator may be invoked at all. On
//! Android-style hosts this wraps the runtime storage-permission flow (and a
//! persisted tree-URI grant); on desktop the process either has filesystem
//! access or it doesn't.
//!
//! The core checks the gate before starting background work and surfaces a
//! denial as an access error rather than attempting the scan.

use async_trait::async_trait;

use crate::error::Result;

/// Permission collaborator trait.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Whether storage access is currently granted.
    async fn has_storage_access(&self) -> bool;

    /// Ask the host to run its grant flow (permission dialog, folder picker).
    ///
    /// Returns whether access is granted afterwards. Hosts without an
    /// interactive flow simply report their static state.
    async fn request_storage_access(&self) -> Result<bool>;
}
