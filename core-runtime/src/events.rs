//! # Event Bus System
//!
//! Event-driven delivery fabric for the core, built on `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The event bus is how background work reports back to the interactive
//! context without the worker ever calling into it synchronously: workers emit
//! typed events, and any number of subscribers (UI adapters, loggers, tests)
//! consume them from their own context.
//!
//! - **Event Types**: Strongly-typed enum hierarchies per domain
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//! - **Subscription Management**: Multiple subscribers listen independently
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, ScanEvent};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! event_bus
//!     .emit(CoreEvent::Scan(ScanEvent::Started {
//!         job_id: "job-1".to_string(),
//!         root: "/music".to_string(),
//!     }))
//!     .ok();
//!
//! let event = stream.recv().await.unwrap();
//! assert!(matches!(event, CoreEvent::Scan(ScanEvent::Started { .. })));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! `tokio::sync::broadcast` produces two receive-side errors:
//!
//! - `RecvError::Lagged(n)`: the subscriber fell behind by `n` events
//! - `RecvError::Closed`: all senders were dropped
//!
//! Emitting with no active subscribers returns an error; callers that emit
//! opportunistically should `.ok()` the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Subscribers that can't keep up will receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Scan-related events
    Scan(ScanEvent),
    /// Permission-related events
    Permission(PermissionEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Scan(e) => e.description(),
            CoreEvent::Permission(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Scan(ScanEvent::Failed { .. }) => EventSeverity::Error,
            CoreEvent::Permission(PermissionEvent::AccessDenied { .. }) => EventSeverity::Warning,
            CoreEvent::Scan(ScanEvent::Completed { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Scan Events
// ============================================================================

/// Events related to background audio-file discovery scans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ScanEvent {
    /// Scan started on the worker context.
    Started {
        /// Unique identifier for this scan job.
        job_id: String,
        /// Location token of the root folder being scanned.
        root: String,
    },
    /// Scan finished successfully. Zero records is still a success.
    Completed {
        /// The scan job ID.
        job_id: String,
        /// Number of audio files discovered.
        records_found: u64,
        /// Wall-clock duration of the scan in milliseconds.
        duration_ms: u64,
    },
    /// Scan aborted with an error; no partial results were delivered.
    Failed {
        /// The scan job ID.
        job_id: String,
        /// Human-readable error message.
        message: String,
    },
    /// Scan was cancelled before completion.
    Cancelled {
        /// The scan job ID.
        job_id: String,
    },
}

impl ScanEvent {
    fn description(&self) -> &str {
        match self {
            ScanEvent::Started { .. } => "Scan started",
            ScanEvent::Completed { .. } => "Scan completed successfully",
            ScanEvent::Failed { .. } => "Scan failed",
            ScanEvent::Cancelled { .. } => "Scan cancelled",
        }
    }
}

// ============================================================================
// Permission Events
// ============================================================================

/// Events related to storage-access grants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PermissionEvent {
    /// Storage access was denied when background work tried to start.
    AccessDenied {
        /// What the access was needed for.
        operation: String,
    },
}

impl PermissionEvent {
    fn description(&self) -> &str {
        match self {
            PermissionEvent::AccessDenied { .. } => "Storage access denied",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for core events.
///
/// Cloning an `EventBus` is cheap and yields a handle to the same channel.
/// Each subscriber receives every event emitted after it subscribed; past
/// events are not replayed.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// When a subscriber falls behind by more than `capacity` events, it
    /// receives `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// if there are no active subscribers.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with filtering.
///
/// # Example
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream};
///
/// let event_bus = EventBus::new(100);
/// let scan_stream = EventStream::new(event_bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Scan(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter function; only matching events are returned by `recv()`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter (if any).
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n`
    /// events, or `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            if filter(&event) {
                return Ok(event);
            }
        }
    }
}
