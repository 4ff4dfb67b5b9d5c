//! # Core Configuration Module
//!
//! Builder-pattern configuration wiring host bridges into the core.
//!
//! ## Overview
//!
//! `CoreConfig` holds the bridge implementations the core needs to run a scan:
//! a [`TreeSource`] for storage access and a [`PermissionGate`] gating it. The
//! builder enforces fail-fast validation so a missing capability is reported
//! at construction, not at first use.
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults are
//! injected automatically if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .tree_source(Arc::new(MyTreeSource))
//!     .permission_gate(Arc::new(MyPermissionGate))
//!     .event_buffer_size(256)
//!     .build()?;
//! ```

use std::fmt;
use std::sync::Arc;

use bridge_traits::{permissions::PermissionGate, storage::TreeSource};

use crate::error::{Error, Result};
use crate::events::{EventBus, DEFAULT_EVENT_BUFFER_SIZE};

/// Assembled core configuration.
///
/// Holds validated bridge handles plus the shared event bus.
#[derive(Clone)]
pub struct CoreConfig {
    tree_source: Arc<dyn TreeSource>,
    permission_gate: Arc<dyn PermissionGate>,
    event_bus: EventBus,
}

// Bridge handles are trait objects with no Debug bound of their own.
impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::new()
    }

    pub fn tree_source(&self) -> Arc<dyn TreeSource> {
        Arc::clone(&self.tree_source)
    }

    pub fn permission_gate(&self) -> Arc<dyn PermissionGate> {
        Arc::clone(&self.permission_gate)
    }

    pub fn event_bus(&self) -> EventBus {
        self.event_bus.clone()
    }
}

/// Builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    tree_source: Option<Arc<dyn TreeSource>>,
    permission_gate: Option<Arc<dyn PermissionGate>>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage-access bridge the scanner reads through.
    pub fn tree_source(mut self, source: Arc<dyn TreeSource>) -> Self {
        self.tree_source = Some(source);
        self
    }

    /// Permission bridge gating storage access.
    pub fn permission_gate(mut self, gate: Arc<dyn PermissionGate>) -> Self {
        self.permission_gate = Some(gate);
        self
    }

    /// Buffer size for the shared event bus.
    pub fn event_buffer_size(mut self, capacity: usize) -> Self {
        self.event_buffer_size = Some(capacity);
        self
    }

    /// Validate and assemble the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] when a required bridge was neither
    /// provided nor available as a desktop default.
    pub fn build(self) -> Result<CoreConfig> {
        let tree_source = match self.tree_source {
            Some(source) => source,
            None => Self::default_tree_source().ok_or_else(|| Error::CapabilityMissing {
                capability: "TreeSource".to_string(),
                message: "No storage-access implementation provided. \
                          Desktop: enable the desktop-shims feature. \
                          Mobile: inject a platform-native adapter."
                    .to_string(),
            })?,
        };

        let permission_gate = match self.permission_gate {
            Some(gate) => gate,
            None => Self::default_permission_gate().ok_or_else(|| Error::CapabilityMissing {
                capability: "PermissionGate".to_string(),
                message: "No permission implementation provided. \
                          Desktop: enable the desktop-shims feature. \
                          Mobile: inject a platform-native adapter."
                    .to_string(),
            })?,
        };

        let capacity = self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        if capacity == 0 {
            return Err(Error::Config(
                "event_buffer_size must be greater than zero".to_string(),
            ));
        }

        Ok(CoreConfig {
            tree_source,
            permission_gate,
            event_bus: EventBus::new(capacity),
        })
    }

    #[cfg(feature = "desktop-shims")]
    fn default_tree_source() -> Option<Arc<dyn TreeSource>> {
        Some(Arc::new(bridge_desktop::FsTreeSource::new()))
    }

    #[cfg(not(feature = "desktop-shims"))]
    fn default_tree_source() -> Option<Arc<dyn TreeSource>> {
        None
    }

    #[cfg(feature = "desktop-shims")]
    fn default_permission_gate() -> Option<Arc<dyn PermissionGate>> {
        Some(Arc::new(bridge_desktop::GrantedPermissionGate))
    }

    #[cfg(not(feature = "desktop-shims"))]
    fn default_permission_gate() -> Option<Arc<dyn PermissionGate>> {
        None
    }
}
