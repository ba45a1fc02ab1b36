//! cordova `config.xml` parsing.
//!
//! Only the parts of the widget document that affect Windows packaging are
//! read. Preferences, icons and splash screens declared inside
//! `<platform name="windows">` are merged with the global ones; platform
//! preferences override global preferences of the same name.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;

use crate::core::descriptor::{non_empty, Descriptor, ImageAsset, Preference};
use crate::core::xml::{Document, Element};

/// The platform name used in `<platform name="..">` blocks.
pub const PLATFORM_NAME: &str = "windows";

/// Parsed `config.xml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigXml {
    pub id: Option<String>,
    pub version: Option<String>,
    pub windows_package_version: Option<String>,
    pub default_locale: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub content_src: Option<String>,
    /// Keyed by lowercase name, in first-declaration order.
    preferences: IndexMap<String, Preference>,
    pub access_origins: Vec<String>,
    pub allow_navigation: Vec<String>,
    pub icons: Vec<ImageAsset>,
    pub splash_screens: Vec<ImageAsset>,
}

impl ConfigXml {
    /// Load and parse a `config.xml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse `config.xml` content.
    pub fn parse(content: &str) -> Result<Self> {
        let doc = Document::parse(content)?;
        let widget = &doc.root;
        if widget.local_name() != "widget" {
            anyhow::bail!("expected a <widget> root element, found <{}>", widget.tag);
        }

        let mut config = ConfigXml {
            id: owned_attr(widget, "id"),
            version: owned_attr(widget, "version"),
            windows_package_version: owned_attr(widget, "windows-packageVersion"),
            default_locale: owned_attr(widget, "defaultlocale"),
            ..Default::default()
        };

        for child in widget.elements() {
            match child.local_name() {
                "name" => config.name = element_text(child),
                "author" => config.author = element_text(child),
                "content" => config.content_src = owned_attr(child, "src"),
                "access" => {
                    if let Some(origin) = owned_attr(child, "origin") {
                        config.access_origins.push(origin);
                    }
                }
                "allow-navigation" => {
                    if let Some(href) = owned_attr(child, "href") {
                        config.allow_navigation.push(href);
                    }
                }
                _ => {}
            }
        }

        config.collect_resources(widget);
        for platform in widget
            .elements()
            .filter(|e| e.local_name() == "platform" && e.attr("name") == Some(PLATFORM_NAME))
        {
            config.collect_resources(platform);
        }

        Ok(config)
    }

    /// Gather preferences and images from `parent`, overriding earlier preferences.
    fn collect_resources(&mut self, parent: &Element) {
        for child in parent.elements() {
            match child.local_name() {
                "preference" => {
                    let (Some(name), Some(value)) = (child.attr("name"), child.attr("value"))
                    else {
                        continue;
                    };
                    self.set_preference(name, value);
                }
                "icon" => self.icons.extend(image_asset(child)),
                "splash" => self.splash_screens.extend(image_asset(child)),
                _ => {}
            }
        }
    }

    /// Set or replace a preference.
    pub fn set_preference(&mut self, name: &str, value: &str) {
        self.preferences
            .insert(name.to_lowercase(), Preference::new(name, value));
    }
}

impl Descriptor for ConfigXml {
    fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    fn version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    fn windows_package_version(&self) -> Option<&str> {
        non_empty(self.windows_package_version.as_deref())
    }

    fn author(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }

    fn package_name(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    fn start_page(&self) -> Option<&str> {
        non_empty(self.content_src.as_deref())
    }

    fn preference(&self, name: &str) -> Option<&str> {
        self.preferences
            .get(&name.to_lowercase())
            .map(|p| p.value.as_str())
            .filter(|v| !v.is_empty())
    }

    fn matching_preferences(&self, pattern: &Regex) -> Vec<Preference> {
        self.preferences
            .values()
            .filter(|p| pattern.is_match(&p.name))
            .cloned()
            .collect()
    }

    fn access_rules(&self) -> Vec<String> {
        self.access_origins.clone()
    }

    fn navigation_whitelist_rules(&self) -> Vec<String> {
        self.allow_navigation.clone()
    }

    fn icons(&self) -> Vec<ImageAsset> {
        self.icons.clone()
    }

    fn splash_screens(&self) -> Vec<ImageAsset> {
        self.splash_screens.clone()
    }

    fn default_locale(&self) -> Option<&str> {
        non_empty(self.default_locale.as_deref())
    }
}

fn owned_attr(element: &Element, key: &str) -> Option<String> {
    element.attr(key).map(str::to_string)
}

fn element_text(element: &Element) -> Option<String> {
    element.text.as_ref().map(|t| t.trim().to_string())
}

fn image_asset(element: &Element) -> Option<ImageAsset> {
    let src = element.attr("src")?;
    Some(ImageAsset {
        src: src.to_string(),
        target: owned_attr(element, "target"),
        width: element.attr("width").and_then(|w| w.trim().parse().ok()),
        height: element.attr("height").and_then(|h| h.trim().parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r##"<?xml version='1.0' encoding='utf-8'?>
<widget id="io.cordova.hello" version="1.2" windows-packageVersion="1.2.3.4" defaultlocale="fr-FR"
        xmlns="http://www.w3.org/ns/widgets">
    <name>Hello</name>
    <author email="dev@example.com">  Apache Cordova Team </author>
    <content src="main.html" />
    <access origin="https://example.com" />
    <access origin="*" />
    <allow-navigation href="http://example.com/*" />
    <preference name="Orientation" value="portrait" />
    <preference name="BackgroundColor" value="#abc" />
    <icon src="res/icon.png" width="150" height="150" />
    <platform name="android">
        <preference name="Orientation" value="landscape" />
    </platform>
    <platform name="windows">
        <preference name="orientation" value="default" />
        <preference name="Windows.Mobile-MinVersion" value="10.0.10586.0" />
        <icon src="res/windows/logo.png" target="Square44x44Logo" />
        <splash src="res/windows/splash.png" width="620" height="300" />
    </platform>
</widget>
"##;

    #[test]
    fn test_parse_widget_metadata() {
        let config = ConfigXml::parse(CONFIG).unwrap();
        assert_eq!(config.package_name(), Some("io.cordova.hello"));
        assert_eq!(config.version(), Some("1.2"));
        assert_eq!(config.windows_package_version(), Some("1.2.3.4"));
        assert_eq!(config.default_locale(), Some("fr-FR"));
        assert_eq!(config.name(), Some("Hello"));
        assert_eq!(config.author(), Some("Apache Cordova Team"));
        assert_eq!(config.start_page(), Some("main.html"));
        assert_eq!(config.access_rules(), vec!["https://example.com", "*"]);
        assert_eq!(config.navigation_whitelist_rules(), vec!["http://example.com/*"]);
    }

    #[test]
    fn test_windows_platform_preferences_override() {
        let config = ConfigXml::parse(CONFIG).unwrap();
        assert_eq!(config.preference("Orientation"), Some("default"));
        assert_eq!(config.preference("ORIENTATION"), Some("default"));
        assert_eq!(config.preference("BackgroundColor"), Some("#abc"));
        assert_eq!(config.preference("Missing"), None);
    }

    #[test]
    fn test_matching_preferences() {
        let config = ConfigXml::parse(CONFIG).unwrap();
        let pattern = Regex::new(r"(?i)^windows\.").unwrap();
        let matches = config.matching_preferences(&pattern);
        assert_eq!(
            matches,
            vec![Preference::new("Windows.Mobile-MinVersion", "10.0.10586.0")]
        );
    }

    #[test]
    fn test_images_include_platform_specific() {
        let config = ConfigXml::parse(CONFIG).unwrap();
        let icons = config.icons();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].width, Some(150));
        assert_eq!(icons[1].target.as_deref(), Some("Square44x44Logo"));
        assert_eq!(icons[1].width, None);

        let splashes = config.splash_screens();
        assert_eq!(splashes.len(), 1);
        assert_eq!(splashes[0].height, Some(300));
    }

    #[test]
    fn test_rejects_non_widget_root() {
        assert!(ConfigXml::parse("<Package />").is_err());
    }
}
