//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the scan core and platform-specific
//! implementations. Each trait represents a capability that the core requires
//! but that must be implemented differently per platform (desktop, Android,
//! iOS).
//!
//! ## Traits
//!
//! - [`TreeSource`](storage::TreeSource) - Folder/file resolution over opaque
//!   location tokens
//! - [`PermissionGate`](permissions::PermissionGate) - Storage-access grant
//!   state and grant flow
//! - [`LifecycleObserver`](lifecycle::LifecycleObserver) - Host lifecycle
//!   transitions driving background work
//!
//! ## Platform Requirements
//!
//! Each supported platform ships concrete adapters for the bridge traits.
//! `bridge-desktop` covers plain-filesystem hosts; tree-grant hosts (SAF,
//! document picker) implement [`TreeSource`](storage::TreeSource) over their
//! own document APIs.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for
//! consistent error handling. Platform implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Distinguish not-found and access-denied from generic I/O failures, since
//!   the core maps those onto distinct scan error kinds
//! - Include error context (e.g., the offending location token)
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks.

pub mod error;
pub mod lifecycle;
pub mod permissions;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use lifecycle::{LifecycleObserver, LifecycleState};
pub use permissions::PermissionGate;
pub use storage::{EntryMetadata, FileRef, FolderRef, TreeSource};
