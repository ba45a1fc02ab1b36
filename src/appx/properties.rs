//! Identity, application, display name, start page and orientation.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::appx::errors::ManifestError;
use crate::core::descriptor::Descriptor;
use crate::core::dialect::Dialect;
use crate::core::version::pad_version;
use crate::core::xml::{Document, Element};

/// Longest `Application@Id` the appx schema accepts.
pub const MAX_APPLICATION_ID_LEN: usize = 64;

/// Start page used when the descriptor has no `<content src>`.
pub const DEFAULT_START_PAGE: &str = "index.html";

/// URI prefix for the Windows 10 start page when none is configured.
pub const DEFAULT_UAP_URI_PREFIX: &str = "ms-appx-web://";

/// Folder holding the web content inside the package.
const CONTENT_PREFIX: &str = "www/";

/// Matches a start page that already carries a URI scheme (`scheme://`).
static URI_SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[\w-]+?://").unwrap());

/// Matches the package-root prefix, `ms-appx://` with or without a third slash.
static APP_ROOT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ms-appx:///?$").unwrap());

/// Whether a `WindowsDefaultUriPrefix` value designates the package root.
///
/// `ms-appx://` does not validate as a Windows 10 start page, so it is treated
/// as "no prefix". Both the start page and the navigation whitelist use this.
pub fn is_app_root_prefix(prefix: &str) -> bool {
    APP_ROOT_PREFIX.is_match(prefix)
}

/// Update Identity, Application, VisualElements and Properties.
pub fn apply_core_properties(
    doc: &mut Document,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    path: &Path,
) -> Result<(), ManifestError> {
    let version = descriptor
        .windows_package_version()
        .or_else(|| descriptor.version())
        .map(pad_version);
    let identity_name = descriptor
        .preference("WindowsStoreIdentityName")
        .or_else(|| descriptor.package_name());

    let identity = doc
        .root
        .find_mut("Identity")
        .ok_or_else(|| ManifestError::missing("Identity", path))?;
    if let Some(name) = identity_name {
        identity.set_attr("Name", name);
    }
    if let Some(version) = version {
        identity.set_attr("Version", version);
    }
    if let Some(publisher) = descriptor.publisher_id() {
        if identity.attr("Publisher") != Some(publisher) {
            identity.set_attr("Publisher", publisher);
        }
    }

    let app = doc
        .root
        .find_mut("Application")
        .ok_or_else(|| ManifestError::missing("Application", path))?;
    if let Some(package_name) = descriptor.package_name() {
        app.set_attr("Id", application_id(package_name));
    }
    let start_page = resolve_start_page(
        descriptor.start_page(),
        descriptor.preference("WindowsDefaultUriPrefix"),
        dialect.is_uap(),
    );
    app.set_attr("StartPage", start_page);

    let display_name = descriptor
        .preference("WindowsStoreDisplayName")
        .or_else(|| descriptor.name());
    let publisher_name = descriptor
        .preference("WindowsStorePublisherName")
        .or_else(|| descriptor.author());

    let visual = visual_elements_mut(&mut doc.root, dialect, path)?;
    if let Some(name) = display_name {
        visual.set_attr("DisplayName", name);
    }

    if let Some(properties) = doc.root.find_mut("Properties") {
        if let (Some(name), Some(element)) = (display_name, properties.find_mut("DisplayName")) {
            element.text = Some(name.to_string());
        }
        if let (Some(name), Some(element)) =
            (publisher_name, properties.find_mut("PublisherDisplayName"))
        {
            element.text = Some(name.to_string());
        }
    }

    apply_orientation(&mut doc.root, descriptor.preference("Orientation"), dialect, path)
}

/// Locate the dialect's VisualElements node.
pub(crate) fn visual_elements_mut<'a>(
    root: &'a mut Element,
    dialect: Dialect,
    path: &Path,
) -> Result<&'a mut Element, ManifestError> {
    let tag = dialect.qualify("VisualElements");
    match root.find_mut(&tag) {
        Some(visual) => Ok(visual),
        None => Err(ManifestError::missing(tag, path)),
    }
}

/// Application ids are limited to 64 characters by the manifest schema.
pub fn application_id(package_name: &str) -> String {
    package_name.chars().take(MAX_APPLICATION_ID_LEN).collect()
}

/// Compute `Application@StartPage`.
///
/// On Windows 10 a start page without a scheme is prefixed with the configured
/// URI prefix (default `ms-appx-web://`). `ms-appx*` prefixes get a third
/// slash so the path resolves from the package root, and local pages are
/// served from the `www/` folder unless the result is an http(s) URI.
pub fn resolve_start_page(start_page: Option<&str>, uri_prefix: Option<&str>, uap: bool) -> String {
    let start_page = start_page.unwrap_or(DEFAULT_START_PAGE);

    let mut prefix = String::new();
    if uap && !URI_SCHEME.is_match(start_page) {
        prefix = match uri_prefix {
            None => DEFAULT_UAP_URI_PREFIX.to_string(),
            Some(p) if is_app_root_prefix(p) => String::new(),
            Some(p) => p.to_string(),
        };
    }

    let remote = starts_with_ignore_case(&prefix, "http") || starts_with_ignore_case(start_page, "http");
    if remote {
        return format!("{}{}", prefix, start_page);
    }

    if starts_with_ignore_case(&prefix, "ms-appx") {
        prefix.push('/');
    }
    format!("{}{}{}", prefix, CONTENT_PREFIX, start_page)
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Rotation values for an `Orientation` preference.
pub fn orientation_values(orientation: &str) -> Vec<&str> {
    match orientation {
        "default" => vec!["portrait", "landscape", "landscapeFlipped"],
        "portrait" => vec!["portrait"],
        "landscape" => vec!["landscape", "landscapeFlipped"],
        // Platform-specific list such as "portrait,landscape,portraitFlipped"
        other => other.split(',').collect(),
    }
}

/// Rebuild `InitialRotationPreference`, or remove it when no orientation is set.
fn apply_orientation(
    root: &mut Element,
    orientation: Option<&str>,
    dialect: Dialect,
    path: &Path,
) -> Result<(), ManifestError> {
    let preference_tag = dialect.qualify("InitialRotationPreference");
    let rotation_tag = dialect.qualify("Rotation");

    let Some(orientation) = orientation else {
        visual_elements_mut(root, dialect, path)?.remove_children(&preference_tag);
        return Ok(());
    };

    if root.find(&preference_tag).is_none() {
        visual_elements_mut(root, dialect, path)?.push(Element::new(preference_tag.as_str()));
    }
    let preference = root
        .find_mut(&preference_tag)
        .ok_or_else(|| ManifestError::missing(preference_tag.as_str(), path))?;

    preference.clear();
    for value in orientation_values(orientation) {
        preference.push(Element::new(rotation_tag.as_str()).with_attr("Preference", value));
    }
    Ok(())
}
