//! Appx manifest reconciliation.
//!
//! Each submodule owns one concern of the manifest and mutates the parsed
//! tree in place. [`transform`] runs them in a fixed order for a single
//! manifest; every step is idempotent, so transforming an already prepared
//! manifest yields the same document.

pub mod access_rules;
pub mod capabilities;
pub mod errors;
pub mod properties;
pub mod target_platform;
pub mod visuals;

use std::path::Path;

use crate::core::descriptor::Descriptor;
use crate::core::dialect::Dialect;
use crate::core::xml::Document;
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};

pub use errors::ManifestError;
pub use target_platform::{min_max_uap_versions, UapVersionRange, UapVersionSet};

/// Reconcile one manifest with the descriptor.
///
/// `path` identifies the manifest in errors and warnings. Missing Identity,
/// Application or VisualElements nodes abort the transformation; recoverable
/// problems are pushed onto `diags`.
pub fn transform(
    doc: &mut Document,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    path: &Path,
    diags: &mut Diagnostics,
) -> Result<(), ManifestError> {
    properties::apply_core_properties(doc, descriptor, dialect, path)?;
    capabilities::sort_capabilities(&mut doc.root);
    access_rules::apply_access_rules(doc, descriptor, dialect, path, diags)?;
    visuals::apply_background_color(&mut doc.root, descriptor, dialect, path, diags)?;
    visuals::apply_toast_capability(&mut doc.root, descriptor, dialect, path)?;

    if dialect.is_uap() {
        target_platform::apply_target_platform_version(&mut doc.root, descriptor)?;

        let restricted = capabilities::restricted_capabilities(&doc.root, descriptor);
        if !restricted.is_empty() {
            diags.push(
                Diagnostic::warning(format!(
                    "The following Capabilities were declared and are restricted: {}",
                    restricted.join(", ")
                ))
                .with_location(path)
                .with_context(
                    "You will be unable to on-board your app to the public Windows Store with \
                     these capabilities and access rules permitting access to remote URIs.",
                )
                .with_suggestion(suggestions::RESTRICTED_CAPABILITIES),
            );
        }

        capabilities::ensure_uap_prefixed_capabilities(&mut doc.root);
    }
    Ok(())
}

/// Parse, transform and serialize manifest text.
///
/// Anything before the first `<` (a byte-order mark, stray whitespace) is
/// dropped before parsing.
pub fn transform_str(
    contents: &str,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    path: &Path,
    diags: &mut Diagnostics,
) -> Result<String, ManifestError> {
    let xml_error = |source| ManifestError::Xml {
        path: path.to_path_buf(),
        source,
    };

    let mut doc = Document::parse(contents).map_err(xml_error)?;
    transform(&mut doc, descriptor, dialect, path, diags)?;
    doc.to_xml(4).map_err(xml_error)
}
