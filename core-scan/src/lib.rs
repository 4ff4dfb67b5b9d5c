//! # Audio File Discovery Core
//!
//! Background discovery of audio files beneath a user-granted root folder.
//!
//! ## Overview
//!
//! Given a [`FolderRef`](bridge_traits::storage::FolderRef) supplied by the
//! host's grant flow, the core walks the whole subtree through the
//! [`TreeSource`](bridge_traits::storage::TreeSource) bridge, classifies each
//! file by declared media type or file-name extension, and delivers the
//! resulting [`AudioFileRecord`] batch back to the interactive context in one
//! piece - or a single error, never partial results.
//!
//! - [`FolderScanner`] - the depth-first traversal itself
//! - [`ScanCoordinator`] - background execution, single-shot delivery,
//!   cancellation, lifecycle wiring
//! - [`classify`] - the audio classification rule
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::storage::FolderRef;
//! use core_runtime::config::CoreConfig;
//! use core_scan::{ScanConfig, ScanCoordinator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let core = CoreConfig::builder().build()?; // desktop-shims defaults
//! let coordinator = ScanCoordinator::from_core_config(&core, ScanConfig::default());
//!
//! let handle = coordinator.start_scan(FolderRef::new("/music")).await?;
//! for record in handle.join().await? {
//!     println!("{} ({} bytes)", record.name, record.size_bytes);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod coordinator;
pub mod error;
pub mod records;
pub mod scanner;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::{is_audio_file, is_audio_file_with};
pub use coordinator::{ScanCoordinator, ScanHandle, ScanJobId};
pub use error::{Result, ScanError};
pub use records::AudioFileRecord;
pub use scanner::{FolderScanner, ScanConfig};
