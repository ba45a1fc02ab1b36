//! Tile and splash-screen colors, toast capability.

use std::path::Path;

use crate::appx::errors::ManifestError;
use crate::appx::properties::visual_elements_mut;
use crate::core::descriptor::Descriptor;
use crate::core::dialect::Dialect;
use crate::core::xml::Element;
use crate::util::diagnostic::{Diagnostic, Diagnostics};

/// Normalize a color to the `#rrggbb` form the manifest requires.
///
/// Accepts `#rgb`, `#rrggbb` and `#aarrggbb`/`0xaarrggbb`. Alpha is not
/// supported by the platform and is dropped.
pub fn refine_color(color: &str) -> String {
    let color = color.replacen("0x", "", 1).replacen('#', "", 1);
    let color = match color.len() {
        3 => color.chars().flat_map(|c| [c, c]).collect(),
        8 => color.chars().skip(2).collect(),
        _ => color,
    };
    format!("#{}", color)
}

/// Apply `BackgroundColor` and `SplashScreenBackgroundColor`.
pub fn apply_background_color(
    root: &mut Element,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    path: &Path,
    diags: &mut Diagnostics,
) -> Result<(), ManifestError> {
    if let Some(color) = descriptor.preference("BackgroundColor") {
        visual_elements_mut(root, dialect, path)?.set_attr("BackgroundColor", refine_color(color));
    }

    if let Some(color) = descriptor.preference("SplashScreenBackgroundColor") {
        match root.find_mut(&dialect.qualify("SplashScreen")) {
            Some(splash) => splash.set_attr("BackgroundColor", refine_color(color)),
            None => diags.push(
                Diagnostic::warning(format!(
                    "no <{}> node, SplashScreenBackgroundColor is ignored",
                    dialect.qualify("SplashScreen")
                ))
                .with_location(path),
            ),
        }
    }
    Ok(())
}

/// Set `ToastCapable="true"` when `WindowsToastCapable` is `true`, otherwise
/// remove the attribute.
pub fn apply_toast_capability(
    root: &mut Element,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    path: &Path,
) -> Result<(), ManifestError> {
    let toast_capable = descriptor
        .preference("WindowsToastCapable")
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));

    let visual = visual_elements_mut(root, dialect, path)?;
    if toast_capable {
        visual.set_attr("ToastCapable", "true");
    } else {
        visual.remove_attr("ToastCapable");
    }
    Ok(())
}
