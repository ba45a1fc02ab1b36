//! Test utilities for appxprep unit tests.
//!
//! Provides a builder for in-memory descriptors, a fixed SDK probe and
//! template manifests for each dialect (see [`fixtures`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use appxprep::test_support::{manifest_fixture, ConfigBuilder};
//!
//! #[test]
//! fn test_example() {
//!     let config = ConfigBuilder::new()
//!         .id("io.cordova.hello")
//!         .preference("Orientation", "portrait")
//!         .build();
//!     let doc = Document::parse(&manifest_fixture(Dialect::Windows10)).unwrap();
//!     // Transform doc with config...
//! }
//! ```

pub mod fixtures;

use crate::core::config_xml::ConfigXml;
use crate::core::descriptor::ImageAsset;
use crate::core::version::Version;
use crate::util::sdk::SdkProbe;

pub use fixtures::*;

/// Builder for a [`ConfigXml`] without going through XML.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: ConfigXml,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.config.id = Some(id.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.config.version = Some(version.to_string());
        self
    }

    pub fn windows_package_version(mut self, version: &str) -> Self {
        self.config.windows_package_version = Some(version.to_string());
        self
    }

    pub fn default_locale(mut self, locale: &str) -> Self {
        self.config.default_locale = Some(locale.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.name = Some(name.to_string());
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.config.author = Some(author.to_string());
        self
    }

    /// Set `<content src>`.
    pub fn content(mut self, src: &str) -> Self {
        self.config.content_src = Some(src.to_string());
        self
    }

    pub fn preference(mut self, name: &str, value: &str) -> Self {
        self.config.set_preference(name, value);
        self
    }

    /// Add an `<access origin>`.
    pub fn access(mut self, origin: &str) -> Self {
        self.config.access_origins.push(origin.to_string());
        self
    }

    pub fn allow_navigation(mut self, href: &str) -> Self {
        self.config.allow_navigation.push(href.to_string());
        self
    }

    pub fn icon(mut self, asset: ImageAsset) -> Self {
        self.config.icons.push(asset);
        self
    }

    pub fn splash(mut self, asset: ImageAsset) -> Self {
        self.config.splash_screens.push(asset);
        self
    }

    pub fn build(self) -> ConfigXml {
        self.config
    }
}

/// An image asset with explicit dimensions.
pub fn sized_image(src: &str, width: u32, height: u32) -> ImageAsset {
    ImageAsset {
        src: src.to_string(),
        width: Some(width),
        height: Some(height),
        ..Default::default()
    }
}

/// An image asset mapped to a logical target name.
pub fn targeted_image(src: &str, target: &str) -> ImageAsset {
    ImageAsset {
        src: src.to_string(),
        target: Some(target.to_string()),
        ..Default::default()
    }
}

/// SDK probe returning a fixed list of versions.
#[derive(Debug, Clone, Default)]
pub struct FixedSdks(pub Vec<Version>);

impl FixedSdks {
    pub fn new(versions: &[&str]) -> Self {
        FixedSdks(
            versions
                .iter()
                .map(|v| v.parse().expect("fixture versions are valid"))
                .collect(),
        )
    }
}

impl SdkProbe for FixedSdks {
    fn available_uap_versions(&self) -> Vec<Version> {
        self.0.clone()
    }
}
