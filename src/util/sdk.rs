//! Windows 10 SDK discovery.
//!
//! Installed UAP platform SDKs live under
//! `%ProgramFiles(x86)%\Windows Kits\10\Platforms\UAP\<version>`. Each
//! directory whose name parses as a [`Version`] is an available target.

use std::path::{Path, PathBuf};

use crate::core::version::Version;

/// Query for installed platform SDK versions.
pub trait SdkProbe {
    /// All UAP target versions installed on this host (possibly none).
    fn available_uap_versions(&self) -> Vec<Version>;
}

/// Probe that scans the Windows Kits installation folder.
#[derive(Debug, Clone, Default)]
pub struct WindowsKits {
    program_files: Option<PathBuf>,
}

impl WindowsKits {
    /// Locate Program Files from the environment.
    pub fn from_env() -> Self {
        let program_files = std::env::var_os("ProgramFiles(x86)")
            .or_else(|| std::env::var_os("ProgramFiles"))
            .map(PathBuf::from);
        WindowsKits { program_files }
    }

    /// Use an explicit Program Files directory.
    pub fn with_program_files(path: impl Into<PathBuf>) -> Self {
        WindowsKits {
            program_files: Some(path.into()),
        }
    }

    /// The `Platforms\UAP` folder, if Program Files is known.
    pub fn uap_platforms_dir(&self) -> Option<PathBuf> {
        self.program_files.as_ref().map(|root| {
            root.join("Windows Kits")
                .join("10")
                .join("Platforms")
                .join("UAP")
        })
    }
}

impl SdkProbe for WindowsKits {
    fn available_uap_versions(&self) -> Vec<Version> {
        let Some(dir) = self.uap_platforms_dir() else {
            tracing::debug!("Program Files not found, skipping UAP SDK discovery");
            return Vec::new();
        };
        scan_version_dirs(&dir)
    }
}

fn scan_version_dirs(dir: &Path) -> Vec<Version> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            tracing::debug!("No UAP SDK folder at {}", dir.display());
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| Version::try_parse(&entry.file_name().to_string_lossy()))
        .collect()
}

/// The lowest and highest installed SDK versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkRange {
    pub min: Version,
    pub max: Version,
}

/// Pick the min and max of the available versions, or `None` if there are none.
pub fn select_sdk_range(versions: &[Version]) -> Option<SdkRange> {
    let min = versions.iter().min()?;
    let max = versions.iter().max()?;
    Some(SdkRange {
        min: *min,
        max: *max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_windows_kits() {
        let tmp = TempDir::new().unwrap();
        let kits = WindowsKits::with_program_files(tmp.path());
        let uap = kits.uap_platforms_dir().unwrap();
        std::fs::create_dir_all(uap.join("10.0.10240.0")).unwrap();
        std::fs::create_dir_all(uap.join("10.0.14393.0")).unwrap();
        std::fs::create_dir_all(uap.join("not-a-version")).unwrap();
        std::fs::write(uap.join("10.0.99999.0"), "file, not a directory").unwrap();

        let mut versions = kits.available_uap_versions();
        versions.sort();
        assert_eq!(
            versions,
            vec![Version::new(10, 0, 10240, 0), Version::new(10, 0, 14393, 0)]
        );
    }

    #[test]
    fn test_missing_kits_folder_is_empty() {
        let tmp = TempDir::new().unwrap();
        let kits = WindowsKits::with_program_files(tmp.path());
        assert!(kits.available_uap_versions().is_empty());
        assert!(WindowsKits::default().available_uap_versions().is_empty());
    }

    #[test]
    fn test_select_sdk_range() {
        assert_eq!(select_sdk_range(&[]), None);

        let range = select_sdk_range(&[
            Version::new(10, 0, 14393, 0),
            Version::new(10, 0, 10240, 0),
            Version::new(10, 0, 10586, 0),
        ])
        .unwrap();
        assert_eq!(range.min, Version::new(10, 0, 10240, 0));
        assert_eq!(range.max, Version::new(10, 0, 14393, 0));
    }
}
