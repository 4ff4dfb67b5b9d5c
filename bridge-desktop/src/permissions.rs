//! Permission Gate Implementation for Desktop

use async_trait::async_trait;
use bridge_traits::{error::Result, permissions::PermissionGate};

/// Desktop permission gate.
///
/// Desktop processes hold whatever filesystem access the OS user grants them;
/// there is no runtime permission flow, so the gate always reports granted.
/// Per-path denials still surface as access errors from the tree source.
pub struct GrantedPermissionGate;

#[async_trait]
impl PermissionGate for GrantedPermissionGate {
    async fn has_storage_access(&self) -> bool {
        true
    }

    async fn request_storage_access(&self) -> Result<bool> {
        Ok(true)
    }
}
