//! High-level operations.
//!
//! This module contains the implementation of appxprep commands.

pub mod build_config;
pub mod images;
pub mod prepare;
pub mod project_version;

pub use build_config::{build_config_file_name, render_build_config, update_build_config};
pub use images::{copy_images, find_platform_image, PlatformImage, PLATFORM_IMAGES};
pub use prepare::{
    apply_platform_config, prepare, update_manifest_file, PrepareOptions, PrepareReport,
};
pub use project_version::{apply_uap_version_to_project, host_supports_uap, update_project_version};
