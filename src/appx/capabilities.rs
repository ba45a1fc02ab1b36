//! Capability ordering and Windows 10 capability rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::descriptor::Descriptor;
use crate::core::xml::Element;

/// Capabilities that block public Store submission when the app can navigate
/// to remote content.
pub const UAP_RESTRICTED_CAPS: [&str; 9] = [
    "enterpriseAuthentication",
    "sharedUserCertificates",
    "documentsLibrary",
    "musicLibrary",
    "picturesLibrary",
    "videosLibrary",
    "removableStorage",
    "internetClientServer",
    "privateNetworkClientServer",
];

/// Capabilities declared in the `uap` namespace (`ST_Capability_Uap` in
/// AppxManifestTypes.xsd).
pub const CAPS_NEEDING_UAPNS: [&str; 13] = [
    "documentsLibrary",
    "picturesLibrary",
    "videosLibrary",
    "musicLibrary",
    "enterpriseAuthentication",
    "sharedUserCertificates",
    "removableStorage",
    "appointments",
    "contacts",
    "userAccountInformation",
    "phoneCall",
    "blockedChatMessages",
    "objects3D",
];

const UAP_PREFIX: &str = "uap:";

/// Any http, https or ms-appx-web URI.
static REMOTE_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(https?|ms-appx-web)://").unwrap());

/// Reorder `Capabilities` children by tag name without namespace prefix.
///
/// The schema requires `Capability` entries before `DeviceCapability` ones.
/// Tags keep their qualified form; only the comparison ignores the prefix.
/// The sort is stable, so entries with the same local name keep their order.
pub fn sort_capabilities(root: &mut Element) {
    let Some(capabilities) = root.find_mut("Capabilities") else {
        return;
    };

    capabilities.sort_elements_by(|a, b| a.local_name().cmp(b.local_name()));
}

/// `Name` attributes of all declared capabilities.
pub fn declared_capabilities(root: &Element) -> Vec<&str> {
    root.find("Capabilities")
        .map(|caps| caps.elements().filter_map(|e| e.attr("Name")).collect())
        .unwrap_or_default()
}

/// Whether the start page or any navigation rule points at remote content.
pub fn has_remote_uris(descriptor: &dyn Descriptor) -> bool {
    descriptor
        .start_page()
        .is_some_and(|page| REMOTE_URI.is_match(page))
        || descriptor
            .navigation_whitelist_rules()
            .iter()
            .any(|rule| REMOTE_URI.is_match(rule))
}

/// Restricted capabilities that are declared, in [`UAP_RESTRICTED_CAPS`] order.
pub fn restricted_capability_declarations(root: &Element) -> Vec<&'static str> {
    let declared = declared_capabilities(root);
    UAP_RESTRICTED_CAPS
        .iter()
        .copied()
        .filter(|cap| declared.contains(cap))
        .collect()
}

/// Restricted capabilities that matter for this app: empty unless the app can
/// reach remote content.
pub fn restricted_capabilities(root: &Element, descriptor: &dyn Descriptor) -> Vec<&'static str> {
    if !has_remote_uris(descriptor) {
        return Vec::new();
    }
    restricted_capability_declarations(root)
}

/// Give every capability from [`CAPS_NEEDING_UAPNS`] the `uap:` prefix.
///
/// Tags that already contain `uap:` are left alone, so this is idempotent.
pub fn ensure_uap_prefixed_capabilities(root: &mut Element) {
    let Some(capabilities) = root.find_mut("Capabilities") else {
        return;
    };

    for cap in capabilities.elements_mut() {
        let needs_prefix = cap
            .attr("Name")
            .is_some_and(|name| CAPS_NEEDING_UAPNS.contains(&name));
        if needs_prefix && !cap.tag.contains(UAP_PREFIX) {
            cap.tag = format!("{}{}", UAP_PREFIX, cap.tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::xml::Document;
    use crate::test_support::ConfigBuilder;
    use pretty_assertions::assert_eq;

    const CAPS: &str = r#"<Package xmlns:uap="http://schemas.microsoft.com/appx/manifest/uap/windows10">
  <Capabilities>
    <DeviceCapability Name="webcam" />
    <uap:Capability Name="picturesLibrary" />
    <Capability Name="internetClient" />
    <DeviceCapability Name="microphone" />
    <Capability Name="documentsLibrary" />
  </Capabilities>
</Package>"#;

    fn tags_and_names(root: &Element) -> Vec<(String, String)> {
        root.find("Capabilities")
            .unwrap()
            .elements()
            .map(|e| (e.tag.clone(), e.attr("Name").unwrap_or("").to_string()))
            .collect()
    }

    #[test]
    fn test_sort_by_local_name_is_stable() {
        let mut doc = Document::parse(CAPS).unwrap();
        sort_capabilities(&mut doc.root);

        let expected: Vec<(String, String)> = [
            ("uap:Capability", "picturesLibrary"),
            ("Capability", "internetClient"),
            ("Capability", "documentsLibrary"),
            ("DeviceCapability", "webcam"),
            ("DeviceCapability", "microphone"),
        ]
        .iter()
        .map(|(t, n)| (t.to_string(), n.to_string()))
        .collect();
        assert_eq!(tags_and_names(&doc.root), expected);
    }

    #[test]
    fn test_sort_moves_comment_with_its_capability() {
        let mut doc = Document::parse(
            r#"<Package>
  <Capabilities>
    <!-- needed for barcode scanning -->
    <DeviceCapability Name="webcam" />
    <Capability Name="internetClient" />
  </Capabilities>
</Package>"#,
        )
        .unwrap();
        sort_capabilities(&mut doc.root);

        let xml = doc.to_xml(4).unwrap();
        let internet = xml.find("internetClient").unwrap();
        let comment = xml.find("barcode scanning").unwrap();
        let webcam = xml.find("webcam").unwrap();
        assert!(internet < comment && comment < webcam, "{}", xml);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut doc = Document::parse(CAPS).unwrap();
        sort_capabilities(&mut doc.root);
        let once = doc.clone();
        sort_capabilities(&mut doc.root);
        assert_eq!(doc, once);
    }

    #[test]
    fn test_sort_without_capabilities_is_noop() {
        let mut doc = Document::parse("<Package><Identity/></Package>").unwrap();
        let before = doc.clone();
        sort_capabilities(&mut doc.root);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_uap_prefix_added_once() {
        let mut doc = Document::parse(CAPS).unwrap();
        ensure_uap_prefixed_capabilities(&mut doc.root);
        let once = doc.to_xml(4).unwrap();
        ensure_uap_prefixed_capabilities(&mut doc.root);
        assert_eq!(doc.to_xml(4).unwrap(), once);

        let tags = tags_and_names(&doc.root);
        assert!(tags.contains(&("uap:Capability".to_string(), "documentsLibrary".to_string())));
        assert!(tags.contains(&("uap:Capability".to_string(), "picturesLibrary".to_string())));
        assert!(tags.contains(&("Capability".to_string(), "internetClient".to_string())));
        assert!(!once.contains("uap:uap:"));
    }

    #[test]
    fn test_restricted_only_with_remote_content() {
        let doc = Document::parse(CAPS).unwrap();

        let local = ConfigBuilder::new().build();
        assert!(restricted_capabilities(&doc.root, &local).is_empty());

        let remote = ConfigBuilder::new()
            .allow_navigation("https://example.com/*")
            .build();
        assert_eq!(
            restricted_capabilities(&doc.root, &remote),
            vec!["documentsLibrary", "picturesLibrary"]
        );

        let remote_start = ConfigBuilder::new().content("http://example.com").build();
        assert!(has_remote_uris(&remote_start));
    }
}
