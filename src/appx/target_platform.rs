//! Windows 10 target device families and their version bounds.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::appx::errors::ManifestError;
use crate::core::descriptor::Descriptor;
use crate::core::version::{Version, BASE_UAP_VERSION};
use crate::core::xml::Element;

/// Device family used when the app declares no version preferences.
pub const DEFAULT_DEVICE_FAMILY: &str = "Windows.Universal";

/// Version-bound preferences such as `Windows.Mobile-MinVersion`.
///
/// Case-insensitive and unanchored. Capture group 1 is the device family
/// (`Windows.Universal`, `Microsoft.Xbox`, ...), capture group 2 is the bound,
/// either `MinVersion` or `MaxVersionTested`. The family group is lazy, so
/// the first `-MinVersion`/`-MaxVersionTested` suffix ends it.
static UAP_VERSION_PREFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Microsoft.+?|Windows.+?)-(MinVersion|MaxVersionTested)").unwrap()
});

/// Version bounds for one device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UapVersionRange {
    pub min_version: Version,
    pub max_version_tested: Version,
}

/// Device family name to version bounds, in order of first appearance.
pub type UapVersionSet = IndexMap<String, UapVersionRange>;

#[derive(Default)]
struct PartialRange {
    min: Option<Version>,
    max: Option<Version>,
}

impl PartialRange {
    fn reconcile(self) -> UapVersionRange {
        let (min_version, max_version_tested) = match (self.min, self.max) {
            (Some(min), Some(max)) => (min, max.max(min)),
            (Some(min), None) => (min, min),
            (None, Some(max)) => (max, max),
            (None, None) => (BASE_UAP_VERSION, BASE_UAP_VERSION),
        };
        UapVersionRange {
            min_version,
            max_version_tested,
        }
    }
}

/// Collect the declared device families and reconcile their bounds.
///
/// A missing bound takes the value of the other one, and a MaxVersionTested
/// below MinVersion is raised to it. Without any matching preference the set
/// holds only [`DEFAULT_DEVICE_FAMILY`] at [`BASE_UAP_VERSION`].
pub fn min_max_uap_versions(descriptor: &dyn Descriptor) -> Result<UapVersionSet, ManifestError> {
    let mut families: IndexMap<String, PartialRange> = IndexMap::new();

    for preference in descriptor.matching_preferences(&UAP_VERSION_PREFERENCE) {
        let Some(caps) = UAP_VERSION_PREFERENCE.captures(&preference.name) else {
            continue;
        };
        let family = caps[1].to_string();
        let bound = &caps[2];

        let version = Version::try_parse(&preference.value).ok_or_else(|| {
            ManifestError::InvalidPlatformVersion {
                value: preference.value.clone(),
                preference: preference.name.clone(),
            }
        })?;

        let range = families.entry(family).or_default();
        if bound.eq_ignore_ascii_case("MinVersion") {
            range.min = Some(version);
        } else {
            range.max = Some(version);
        }
    }

    if families.is_empty() {
        families.insert(DEFAULT_DEVICE_FAMILY.to_string(), PartialRange::default());
    }

    Ok(families
        .into_iter()
        .map(|(family, range)| (family, range.reconcile()))
        .collect())
}

/// Replace the `Dependencies` children with one `TargetDeviceFamily` per family.
pub fn apply_target_platform_version(
    root: &mut Element,
    descriptor: &dyn Descriptor,
) -> Result<(), ManifestError> {
    let families = min_max_uap_versions(descriptor)?;

    if root.child("Dependencies").is_none() {
        root.insert_after("Properties", Element::new("Dependencies"));
    }
    let Some(dependencies) = root.child_mut("Dependencies") else {
        return Ok(());
    };

    dependencies.clear();
    for (family, range) in &families {
        tracing::debug!(
            "target device family {} {} - {}",
            family,
            range.min_version,
            range.max_version_tested
        );
        dependencies.push(
            Element::new("TargetDeviceFamily")
                .with_attr("Name", family.as_str())
                .with_attr("MinVersion", range.min_version.to_string())
                .with_attr("MaxVersionTested", range.max_version_tested.to_string()),
        );
    }
    Ok(())
}
