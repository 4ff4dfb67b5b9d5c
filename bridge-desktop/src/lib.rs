//! # Desktop Bridge Implementations
//!
//! Desktop implementations of the host bridge traits:
//! - [`FsTreeSource`] - tree source over `tokio::fs`, with location tokens
//!   interpreted as filesystem paths
//! - [`GrantedPermissionGate`] - always-granted permission gate
//!
//! Tree-grant hosts (Android SAF, iOS document picker) provide their own
//! [`TreeSource`](bridge_traits::storage::TreeSource) adapters instead.

pub mod filesystem;
pub mod permissions;

pub use filesystem::FsTreeSource;
pub use permissions::GrantedPermissionGate;
