//! Write installed SDK versions into the Windows 10 project file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::appx::errors::ManifestError;
use crate::core::xml::{Document, Element};
use crate::util::fs::{read_to_string, write_string};
use crate::util::sdk::{select_sdk_range, SdkProbe, SdkRange};

/// Whether this host can run the UAP toolchain.
pub fn host_supports_uap() -> bool {
    cfg!(windows)
}

/// Query `probe` and patch the project with the SDK range it reports.
///
/// Returns the range that was written, or `None` when no SDK is installed.
pub fn update_project_version(project: &Path, probe: &dyn SdkProbe) -> Result<Option<SdkRange>> {
    let versions = probe.available_uap_versions();
    let Some(range) = select_sdk_range(&versions) else {
        tracing::debug!("no UAP SDK installed, leaving {} untouched", project.display());
        return Ok(None);
    };

    tracing::debug!("UAP SDKs available: {} - {}", range.min, range.max);
    apply_uap_version_to_project(project, range)?;
    Ok(Some(range))
}

/// Set `TargetPlatformVersion` to the highest and `TargetPlatformMinVersion`
/// to the lowest installed SDK.
pub fn apply_uap_version_to_project(project: &Path, range: SdkRange) -> Result<()> {
    let contents = read_to_string(project)?;
    let mut doc = Document::parse(contents.trim()).map_err(|source| ManifestError::Xml {
        path: project.to_path_buf(),
        source,
    })?;

    let group = doc
        .root
        .elements_mut()
        .find(|e| e.tag == "PropertyGroup" && e.child("TargetPlatformVersion").is_some())
        .ok_or_else(|| ManifestError::missing("PropertyGroup/TargetPlatformVersion", project))?;

    if let Some(target) = group.child_mut("TargetPlatformVersion") {
        target.text = Some(range.max.to_string());
    }
    match group.child_mut("TargetPlatformMinVersion") {
        Some(min) => min.text = Some(range.min.to_string()),
        None => {
            group.insert_after(
                "TargetPlatformVersion",
                Element::new("TargetPlatformMinVersion")
                    .with_text(range.min.to_string()),
            );
        }
    }

    let xml = doc
        .to_xml(4)
        .with_context(|| format!("failed to serialize {}", project.display()))?;
    write_string(project, &xml)
}
