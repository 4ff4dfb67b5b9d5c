//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the scan core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other core crates depend on.
//! It establishes the logging conventions and the event broadcasting fabric
//! that carries worker-context outcomes back to interactive-context observers.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
