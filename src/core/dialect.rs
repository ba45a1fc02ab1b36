//! Manifest dialects and their fixed per-file settings.

use std::fmt;

/// One of the four appx manifest variants shipped with the Windows project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Windows 8.0 (`package.windows80.appxmanifest`).
    Windows80,
    /// Windows 8.1 (`package.windows.appxmanifest`).
    Windows81,
    /// Windows Phone 8.1 (`package.phone.appxmanifest`).
    Phone81,
    /// Windows 10 Universal App Platform (`package.windows10.appxmanifest`).
    Windows10,
}

/// Manifests in the order they are processed.
pub const DIALECTS: [Dialect; 4] = [
    Dialect::Windows81,
    Dialect::Windows80,
    Dialect::Windows10,
    Dialect::Phone81,
];

/// The Windows 10 project file that receives SDK versions.
pub const PROJECT_WINDOWS10: &str = "CordovaApp.Windows10.jsproj";

impl Dialect {
    /// Manifest file name, relative to the platform root.
    pub fn file_name(self) -> &'static str {
        match self {
            Dialect::Windows80 => "package.windows80.appxmanifest",
            Dialect::Windows81 => "package.windows.appxmanifest",
            Dialect::Phone81 => "package.phone.appxmanifest",
            Dialect::Windows10 => "package.windows10.appxmanifest",
        }
    }

    /// Namespace prefix used for VisualElements and friends (`"m2:"`, or empty).
    pub fn namespace_prefix(self) -> &'static str {
        match self {
            Dialect::Windows80 => "",
            Dialect::Windows81 => "m2:",
            Dialect::Phone81 => "m3:",
            Dialect::Windows10 => "uap:",
        }
    }

    /// Whether this is the Windows 10 UAP dialect.
    pub fn is_uap(self) -> bool {
        matches!(self, Dialect::Windows10)
    }

    /// Qualify a local element name with this dialect's prefix.
    pub fn qualify(self, local: &str) -> String {
        format!("{}{}", self.namespace_prefix(), local)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Windows80 => write!(f, "Windows 8.0"),
            Dialect::Windows81 => write!(f, "Windows 8.1"),
            Dialect::Phone81 => write!(f, "Windows Phone 8.1"),
            Dialect::Windows10 => write!(f, "Windows 10"),
        }
    }
}
