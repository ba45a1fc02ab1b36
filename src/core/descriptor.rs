//! The platform-neutral application descriptor.
//!
//! Everything the manifest transformation needs to know about the app is read
//! through the [`Descriptor`] trait. The concrete source is usually a cordova
//! `config.xml` (see [`ConfigXml`](crate::core::config_xml::ConfigXml)), but
//! tests and embedders can provide their own implementation.

use regex::Regex;

use crate::util::config::BuildOptions;

/// A `<preference name=".." value=".."/>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub name: String,
    pub value: String,
}

impl Preference {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Preference {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An icon or splash-screen image declared by the app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAsset {
    /// Source path, relative to the application root.
    pub src: String,
    /// Explicit logical name in the package (`Square44x44Logo`, ...).
    pub target: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Read-only view of the app configuration.
///
/// String accessors return `None` when the value is absent or empty.
pub trait Descriptor {
    fn name(&self) -> Option<&str>;

    fn version(&self) -> Option<&str>;

    /// Windows-only override of [`Descriptor::version`].
    fn windows_package_version(&self) -> Option<&str> {
        None
    }

    fn author(&self) -> Option<&str>;

    /// Reverse-domain package id (`io.cordova.hello`).
    fn package_name(&self) -> Option<&str>;

    fn start_page(&self) -> Option<&str>;

    /// Preference value by case-insensitive name.
    fn preference(&self, name: &str) -> Option<&str>;

    /// All preferences whose name matches `pattern`, in declaration order.
    fn matching_preferences(&self, pattern: &Regex) -> Vec<Preference>;

    /// Origins from `<access origin=".."/>`.
    fn access_rules(&self) -> Vec<String>;

    /// Targets from `<allow-navigation href=".."/>`.
    fn navigation_whitelist_rules(&self) -> Vec<String>;

    fn icons(&self) -> Vec<ImageAsset>;

    fn splash_screens(&self) -> Vec<ImageAsset>;

    fn default_locale(&self) -> Option<&str> {
        None
    }

    fn publisher_id(&self) -> Option<&str> {
        None
    }

    fn package_certificate_key_file(&self) -> Option<&str> {
        None
    }

    fn package_thumbprint(&self) -> Option<&str> {
        None
    }
}

/// A descriptor with externally supplied build options layered on top.
///
/// Build options win over values from the wrapped descriptor.
#[derive(Debug, Clone)]
pub struct WithBuildOptions<'a, D: ?Sized> {
    inner: &'a D,
    options: &'a BuildOptions,
}

impl<'a, D: Descriptor + ?Sized> WithBuildOptions<'a, D> {
    pub fn new(inner: &'a D, options: &'a BuildOptions) -> Self {
        WithBuildOptions { inner, options }
    }
}

impl<D: Descriptor + ?Sized> Descriptor for WithBuildOptions<'_, D> {
    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn version(&self) -> Option<&str> {
        self.inner.version()
    }

    fn windows_package_version(&self) -> Option<&str> {
        self.inner.windows_package_version()
    }

    fn author(&self) -> Option<&str> {
        self.inner.author()
    }

    fn package_name(&self) -> Option<&str> {
        self.inner.package_name()
    }

    fn start_page(&self) -> Option<&str> {
        self.inner.start_page()
    }

    fn preference(&self, name: &str) -> Option<&str> {
        self.inner.preference(name)
    }

    fn matching_preferences(&self, pattern: &Regex) -> Vec<Preference> {
        self.inner.matching_preferences(pattern)
    }

    fn access_rules(&self) -> Vec<String> {
        self.inner.access_rules()
    }

    fn navigation_whitelist_rules(&self) -> Vec<String> {
        self.inner.navigation_whitelist_rules()
    }

    fn icons(&self) -> Vec<ImageAsset> {
        self.inner.icons()
    }

    fn splash_screens(&self) -> Vec<ImageAsset> {
        self.inner.splash_screens()
    }

    fn default_locale(&self) -> Option<&str> {
        self.inner.default_locale()
    }

    fn publisher_id(&self) -> Option<&str> {
        non_empty(self.options.publisher_id.as_deref()).or_else(|| self.inner.publisher_id())
    }

    fn package_certificate_key_file(&self) -> Option<&str> {
        non_empty(self.options.package_certificate_key_file.as_deref())
            .or_else(|| self.inner.package_certificate_key_file())
    }

    fn package_thumbprint(&self) -> Option<&str> {
        non_empty(self.options.package_thumbprint.as_deref())
            .or_else(|| self.inner.package_thumbprint())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
