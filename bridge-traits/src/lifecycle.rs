//! Host Lifecycle Hooks
//!
//! Abstracts activity-style lifecycle transitions as explicit hooks, so the
//! surrounding application can wire its own lifecycle (Android activity,
//! desktop window, headless daemon) to the core's start/stop of background
//! work without the core depending on any UI framework.

use async_trait::async_trait;

/// Host lifecycle states relevant to background work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Host became visible/interactive; background work may start.
    Started,
    /// Host left the interactive state; long-running work should wind down.
    Stopped,
    /// Host is being torn down; all background work must end.
    Destroyed,
}

/// Observer for host lifecycle transitions.
///
/// Core components implement this so hosts can forward their lifecycle
/// callbacks without knowing what work is in flight.
#[async_trait]
pub trait LifecycleObserver: Send + Sync {
    async fn on_state_change(&self, state: LifecycleState);
}
