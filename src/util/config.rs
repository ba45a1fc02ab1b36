//! Build option support for appxprep.
//!
//! Build options come from two places:
//! - `build.json` - the cordova build configuration file
//! - command line flags
//!
//! Command line flags take precedence over `build.json`.
//!
//! `build.json` groups options per platform and build type:
//! ```json
//! {
//!     "windows": {
//!         "release": { "packageCertificateKeyFile": "res/cert.pfx", "publisherId": "CN=me" }
//!     }
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Debug or release packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

/// Externally supplied build options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// Path to the signing certificate (`.pfx`)
    pub package_certificate_key_file: Option<String>,

    /// Thumbprint of the signing certificate
    pub package_thumbprint: Option<String>,

    /// Publisher id written to `Identity@Publisher`
    pub publisher_id: Option<String>,

    /// Debug or release
    pub build_type: Option<BuildType>,
}

impl BuildOptions {
    /// Merge another set of options into this one (other takes precedence).
    pub fn merge(&mut self, other: BuildOptions) {
        if other.package_certificate_key_file.is_some() {
            self.package_certificate_key_file = other.package_certificate_key_file;
        }
        if other.package_thumbprint.is_some() {
            self.package_thumbprint = other.package_thumbprint;
        }
        if other.publisher_id.is_some() {
            self.publisher_id = other.publisher_id;
        }
        if other.build_type.is_some() {
            self.build_type = other.build_type;
        }
    }

    /// The effective build type (debug unless set).
    pub fn build_type(&self) -> BuildType {
        self.build_type.unwrap_or_default()
    }
}

/// Options for one platform, per build type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlatformBuildConfig {
    pub debug: Option<BuildOptions>,
    pub release: Option<BuildOptions>,
}

/// The `build.json` file layout. Other platforms' sections are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildJson {
    pub windows: Option<PlatformBuildConfig>,
}

impl BuildJson {
    /// Load a `build.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build config: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse build config: {}", path.display()))
    }

    /// Options for the Windows platform and the given build type.
    pub fn windows_options(&self, build_type: BuildType) -> BuildOptions {
        let mut options = self
            .windows
            .as_ref()
            .and_then(|windows| match build_type {
                BuildType::Debug => windows.debug.clone(),
                BuildType::Release => windows.release.clone(),
            })
            .unwrap_or_default();
        options.build_type.get_or_insert(build_type);
        options
    }
}
