//! appxprep - Windows packaging preparation for cordova apps
//!
//! This crate reconciles the appx manifests of a cordova Windows platform
//! (Windows 8.0, 8.1, Phone 8.1 and Windows 10) with the app descriptor,
//! injects installed SDK versions into the Windows 10 project, emits the
//! signing configuration and copies icons and splash screens.

pub mod appx;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for appxprep unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides descriptor builders, template manifests
/// and a fixed SDK probe.
#[cfg(test)]
pub mod test_support;

pub use appx::{transform, ManifestError};
pub use core::{ConfigXml, Descriptor, Dialect, Document, Version};
pub use ops::{prepare, update_build_config, PrepareOptions, PrepareReport};
