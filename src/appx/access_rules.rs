//! `ApplicationContentUriRules`: access origins and the navigation whitelist.
//!
//! Windows 8.x manifests get one `Rule` per `<access origin>`; Windows 10
//! manifests get one `uap:Rule` per `<allow-navigation href>`, with WinRT
//! access enabled. Either way the rules element is recreated from scratch and
//! omitted entirely when there is nothing to allow.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::appx::errors::ManifestError;
use crate::appx::properties::is_app_root_prefix;
use crate::core::descriptor::Descriptor;
use crate::core::dialect::Dialect;
use crate::core::xml::{Document, Element};
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};

/// Navigation rule that keeps local package content reachable.
pub const LOCAL_CONTENT_RULE: &str = "ms-appx-web:///";

/// Schemes allowed in the Windows 10 navigation whitelist.
static NAVIGATION_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:https?|ms-appx-web)://").unwrap());

static LOCAL_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ms-appx-web:///$").unwrap());

const LEGACY_RULE_ATTRIBUTES: &[(&str, &str)] = &[("Type", "include")];

const UAP_RULE_ATTRIBUTES: &[(&str, &str)] =
    &[("Type", "include"), ("WindowsRuntimeAccess", "all")];

/// Write the access or navigation rules appropriate for `dialect`.
pub fn apply_access_rules(
    doc: &mut Document,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    path: &Path,
    diags: &mut Diagnostics,
) -> Result<(), ManifestError> {
    let (container, rule, rules, attributes) = if dialect.is_uap() {
        (
            "uap:ApplicationContentUriRules",
            "uap:Rule",
            navigation_whitelist(descriptor, path, diags),
            UAP_RULE_ATTRIBUTES,
        )
    } else {
        (
            "ApplicationContentUriRules",
            "Rule",
            legacy_access_rules(descriptor, path, diags),
            LEGACY_RULE_ATTRIBUTES,
        )
    };

    let app = doc
        .root
        .find_mut("Application")
        .ok_or_else(|| ManifestError::missing("Application", path))?;
    replace_content_uri_rules(app, container, rule, &rules, attributes);
    Ok(())
}

/// Access origins for Windows 8.x.
///
/// Only `https://` origins and `*` are accepted. A `*` means every origin is
/// allowed, which the manifest expresses by having no rules at all.
pub fn legacy_access_rules(
    descriptor: &dyn Descriptor,
    path: &Path,
    diags: &mut Diagnostics,
) -> Vec<String> {
    let rules: Vec<String> = descriptor
        .access_rules()
        .into_iter()
        .filter(|rule| {
            let ok = rule.starts_with("https://") || rule == "*";
            if !ok {
                diags.push(
                    Diagnostic::warning(format!(
                        "Access rules must begin with \"https://\", the following rule will be ignored: {}",
                        rule
                    ))
                    .with_location(path)
                    .with_suggestion(suggestions::HTTPS_ACCESS_RULE),
                );
            }
            ok
        })
        .collect();

    if rules.iter().any(|rule| rule == "*") {
        return Vec::new();
    }
    rules
}

/// Navigation whitelist for Windows 10.
///
/// Rules with unsupported schemes are dropped. Unless the start page is served
/// from the package root, `ms-appx-web:///` is added so local content can
/// still navigate.
pub fn navigation_whitelist(
    descriptor: &dyn Descriptor,
    path: &Path,
    diags: &mut Diagnostics,
) -> Vec<String> {
    let mut rules: Vec<String> = descriptor
        .navigation_whitelist_rules()
        .into_iter()
        .filter(|rule| {
            let ok = NAVIGATION_SCHEME.is_match(rule);
            if !ok {
                diags.push(
                    Diagnostic::warning(format!(
                        "The following navigation rule had an invalid URI scheme and is ignored: \"{}\".",
                        rule
                    ))
                    .with_location(path)
                    .with_suggestion(suggestions::NAVIGATION_SCHEME),
                );
            }
            ok
        })
        .collect();

    let serves_from_root = descriptor
        .preference("WindowsDefaultUriPrefix")
        .is_some_and(is_app_root_prefix);
    if !serves_from_root && !rules.iter().any(|rule| LOCAL_CONTENT.is_match(rule)) {
        rules.push(LOCAL_CONTENT_RULE.to_string());
    }
    rules
}

fn replace_content_uri_rules(
    app: &mut Element,
    container: &str,
    rule: &str,
    origins: &[String],
    attributes: &[(&str, &str)],
) {
    app.remove_children(container);
    if origins.is_empty() {
        return;
    }

    let rules = app.push(Element::new(container));
    for origin in origins {
        let mut element = Element::new(rule).with_attr("Match", origin.as_str());
        for (key, value) in attributes {
            element.set_attr(*key, *value);
        }
        rules.push(element);
    }
}
