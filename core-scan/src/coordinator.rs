//! # Scan Coordinator
//!
//! Runs [`FolderScanner`] off the interactive context and hands the outcome
//! back exactly once.
//!
//! ## Overview
//!
//! The coordinator is the seam between the interactive context and the worker
//! context. `start_scan` validates the permission gate, spawns the traversal
//! on a background task, and returns a [`ScanHandle`] - a single-shot
//! completion channel that resolves with either the full record batch or a
//! single [`ScanError`]. Observers that don't own the handle (UI adapters,
//! logs) follow the same outcome through [`ScanEvent`]s on the shared bus.
//!
//! Delivery rules:
//! - success and error are mutually exclusive and delivered exactly once
//! - an empty batch is a success; the caller decides how to surface it
//! - partial results are never delivered; any failure aborts the whole scan
//!
//! At most one scan is in flight per coordinator; a second `start_scan` while
//! one is running is rejected with [`ScanError::ScanInProgress`]. In-flight
//! scans can be cancelled explicitly or through the host lifecycle hooks
//! ([`LifecycleObserver`]).
//!
//! ## Usage
//!
//! ```ignore
//! use core_scan::{ScanConfig, ScanCoordinator};
//! use bridge_traits::storage::FolderRef;
//!
//! # async fn example(coordinator: ScanCoordinator) -> Result<(), Box<dyn std::error::Error>> {
//! let handle = coordinator
//!     .start_scan(FolderRef::new("/music/audiobooks"))
//!     .await?;
//! let records = handle.join().await?;
//! println!("found {} audio files", records.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bridge_traits::lifecycle::{LifecycleObserver, LifecycleState};
use bridge_traits::permissions::PermissionGate;
use bridge_traits::storage::{FolderRef, TreeSource};
use core_runtime::config::CoreConfig;
use core_runtime::events::{CoreEvent, EventBus, PermissionEvent, ScanEvent};
use tokio::sync::{oneshot, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, ScanError};
use crate::records::AudioFileRecord;
use crate::scanner::{FolderScanner, ScanConfig};

/// Unique identifier for a scan job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanJobId(Uuid);

impl ScanJobId {
    /// Create a new random scan job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a scan job ID from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidJobId`] if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ScanError::InvalidJobId(e.to_string()))
    }

    /// Get the string representation of this ID.
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ScanJobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanJobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ScanJobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Single-shot completion handle for an in-flight scan.
///
/// Dropping the handle does not cancel the scan; events still report the
/// outcome.
#[derive(Debug)]
pub struct ScanHandle {
    job_id: ScanJobId,
    rx: oneshot::Receiver<Result<Vec<AudioFileRecord>>>,
}

impl ScanHandle {
    pub fn job_id(&self) -> ScanJobId {
        self.job_id
    }

    /// Await the scan outcome: the full record batch, or the single error
    /// that aborted the scan.
    pub async fn join(self) -> Result<Vec<AudioFileRecord>> {
        self.rx.await.map_err(|_| {
            ScanError::Io("scan worker dropped before delivering a result".to_string())
        })?
    }
}

struct InFlight {
    job_id: ScanJobId,
    cancel: CancellationToken,
}

/// Coordinates background scans against a single tree source.
pub struct ScanCoordinator {
    source: Arc<dyn TreeSource>,
    permissions: Arc<dyn PermissionGate>,
    events: EventBus,
    config: ScanConfig,
    in_flight: Arc<Mutex<Option<InFlight>>>,
}

impl ScanCoordinator {
    pub fn new(
        source: Arc<dyn TreeSource>,
        permissions: Arc<dyn PermissionGate>,
        events: EventBus,
        config: ScanConfig,
    ) -> Self {
        Self {
            source,
            permissions,
            events,
            config,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Wire a coordinator from an assembled [`CoreConfig`].
    pub fn from_core_config(core: &CoreConfig, config: ScanConfig) -> Self {
        Self::new(
            core.tree_source(),
            core.permission_gate(),
            core.event_bus(),
            config,
        )
    }

    /// The event bus scan outcomes are mirrored onto.
    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    /// The job currently in flight, if any.
    pub async fn current_job(&self) -> Option<ScanJobId> {
        self.in_flight.lock().await.as_ref().map(|f| f.job_id)
    }

    /// Start a background scan under `root`.
    ///
    /// Returns immediately with a [`ScanHandle`]; the traversal runs on a
    /// worker task and never blocks the caller's context.
    ///
    /// # Errors
    ///
    /// - [`ScanError::Access`] when the permission gate reports no storage
    ///   access; nothing is spawned
    /// - [`ScanError::ScanInProgress`] when another scan is already running
    pub async fn start_scan(&self, root: FolderRef) -> Result<ScanHandle> {
        if !self.permissions.has_storage_access().await {
            self.events
                .emit(CoreEvent::Permission(PermissionEvent::AccessDenied {
                    operation: "audio file scan".to_string(),
                }))
                .ok();
            return Err(ScanError::Access("storage access not granted".to_string()));
        }

        let job_id = ScanJobId::new();
        let cancel = CancellationToken::new();
        {
            let mut guard = self.in_flight.lock().await;
            if let Some(in_flight) = guard.as_ref() {
                return Err(ScanError::ScanInProgress {
                    job_id: in_flight.job_id.as_str(),
                });
            }
            *guard = Some(InFlight {
                job_id,
                cancel: cancel.clone(),
            });
        }

        info!(%job_id, root = %root, "Starting background scan");
        self.events
            .emit(CoreEvent::Scan(ScanEvent::Started {
                job_id: job_id.as_str(),
                root: root.token().to_string(),
            }))
            .ok();

        let (tx, rx) = oneshot::channel();
        let scanner = FolderScanner::new(Arc::clone(&self.source), self.config.clone());
        let events = self.events.clone();
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            let started_at = Instant::now();
            let outcome = scanner.scan_with_cancel(&root, &cancel).await;

            {
                let mut guard = in_flight.lock().await;
                if guard.as_ref().map(|f| f.job_id) == Some(job_id) {
                    *guard = None;
                }
            }

            match &outcome {
                Ok(records) => {
                    let duration_ms = started_at.elapsed().as_millis() as u64;
                    info!(%job_id, records = records.len(), duration_ms, "Scan completed");
                    events
                        .emit(CoreEvent::Scan(ScanEvent::Completed {
                            job_id: job_id.as_str(),
                            records_found: records.len() as u64,
                            duration_ms,
                        }))
                        .ok();
                }
                Err(ScanError::Cancelled) => {
                    debug!(%job_id, "Scan cancelled");
                    events
                        .emit(CoreEvent::Scan(ScanEvent::Cancelled {
                            job_id: job_id.as_str(),
                        }))
                        .ok();
                }
                Err(e) => {
                    warn!(%job_id, error = %e, "Scan failed");
                    events
                        .emit(CoreEvent::Scan(ScanEvent::Failed {
                            job_id: job_id.as_str(),
                            message: e.to_string(),
                        }))
                        .ok();
                }
            }

            // Receiver may have been dropped; events already carried the outcome.
            let _ = tx.send(outcome);
        });

        Ok(ScanHandle { job_id, rx })
    }

    /// Cancel the scan with the given job ID.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::JobNotFound`] when no scan with that ID is in
    /// flight.
    pub async fn cancel(&self, job_id: ScanJobId) -> Result<()> {
        let guard = self.in_flight.lock().await;
        match guard.as_ref() {
            Some(in_flight) if in_flight.job_id == job_id => {
                in_flight.cancel.cancel();
                Ok(())
            }
            _ => Err(ScanError::JobNotFound {
                job_id: job_id.as_str(),
            }),
        }
    }

    /// Cancel whatever scan is in flight. Idempotent.
    pub async fn shutdown(&self) {
        let guard = self.in_flight.lock().await;
        if let Some(in_flight) = guard.as_ref() {
            debug!(job_id = %in_flight.job_id, "Shutdown cancelling in-flight scan");
            in_flight.cancel.cancel();
        }
    }
}

#[async_trait]
impl LifecycleObserver for ScanCoordinator {
    async fn on_state_change(&self, state: LifecycleState) {
        match state {
            LifecycleState::Started => {
                debug!("Host entered interactive state");
            }
            LifecycleState::Stopped | LifecycleState::Destroyed => {
                self.shutdown().await;
            }
        }
    }
}
