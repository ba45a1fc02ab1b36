//! Fatal manifest transformation errors.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::xml::XmlError;

/// Error that aborts processing of one manifest file.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error("invalid manifest file (no <{node}> node): {}", .path.display())]
    #[diagnostic(
        code(appxprep::manifest::missing_node),
        help("Restore the manifest from the platform template")
    )]
    MissingNode { node: String, path: PathBuf },

    #[error(
        "could not comprehend a valid version from the string \"{value}\" of platform-boundary \"{preference}\""
    )]
    #[diagnostic(
        code(appxprep::uap::invalid_version),
        help("Platform versions look like 10.0.10240.0")
    )]
    InvalidPlatformVersion { value: String, preference: String },

    #[error("failed to parse {}", .path.display())]
    #[diagnostic(code(appxprep::manifest::xml))]
    Xml {
        path: PathBuf,
        #[source]
        source: XmlError,
    },
}

impl ManifestError {
    pub(crate) fn missing(node: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ManifestError::MissingNode {
            node: node.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_node_message_names_file() {
        let err = ManifestError::missing("Identity", "package.windows.appxmanifest");
        assert_eq!(
            err.to_string(),
            "invalid manifest file (no <Identity> node): package.windows.appxmanifest"
        );
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("appxprep::manifest::missing_node")
        );
    }
}
