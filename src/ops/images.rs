//! Copy icons and splash screens into the platform `images` folder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::descriptor::{Descriptor, ImageAsset};
use crate::util::diagnostic::{suggestions, Diagnostic, Diagnostics};
use crate::util::fs::{copy_file, ensure_dir};

/// Folder under the platform root that receives the images.
pub const IMAGES_DIR: &str = "images";

/// Scale suffix given to images copied without one.
const DEFAULT_SCALE: &str = ".scale-100";

/// A platform asset file and the pixel size it must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformImage {
    pub dest: &'static str,
    pub width: u32,
    pub height: u32,
}

const fn image(dest: &'static str, width: u32, height: u32) -> PlatformImage {
    PlatformImage {
        dest,
        width,
        height,
    }
}

/// Platform assets, searched in order when an image is matched by size.
///
/// Scaled entries after `SplashScreen.scale-100.png` only exist so images
/// declared by size keep resolving.
pub const PLATFORM_IMAGES: [PlatformImage; 15] = [
    image("Square150x150Logo.scale-100.png", 150, 150),
    image("Square30x30Logo.scale-100.png", 30, 30),
    image("StoreLogo.scale-100.png", 50, 50),
    image("SplashScreen.scale-100.png", 620, 300),
    image("StoreLogo.scale-240.png", 120, 120),
    image("Square44x44Logo.scale-100.png", 44, 44),
    image("Square44x44Logo.scale-240.png", 106, 106),
    image("Square70x70Logo.scale-100.png", 70, 70),
    image("Square71x71Logo.scale-100.png", 71, 71),
    image("Square71x71Logo.scale-240.png", 170, 170),
    image("Square150x150Logo.scale-240.png", 360, 360),
    image("Square310x310Logo.scale-100.png", 310, 310),
    image("Wide310x150Logo.scale-100.png", 310, 150),
    image("Wide310x150Logo.scale-240.png", 744, 360),
    image("SplashScreenPhone.scale-240.png", 1152, 1920),
];

/// Find the platform asset for an image of the given size.
///
/// With only one dimension known, the other is not compared. Without any,
/// nothing matches since the platform needs exact sizes.
pub fn find_platform_image(width: Option<u32>, height: Option<u32>) -> Option<&'static PlatformImage> {
    if width.is_none() && height.is_none() {
        return None;
    }
    PLATFORM_IMAGES.iter().find(|candidate| {
        width.map_or(true, |w| w == candidate.width)
            && height.map_or(true, |h| h == candidate.height)
    })
}

/// Copy every icon and splash screen of the descriptor.
///
/// Sources are relative to `app_root`; destinations go to `platform_root/images`.
/// Returns the written files.
pub fn copy_images(
    descriptor: &dyn Descriptor,
    app_root: &Path,
    platform_root: &Path,
    diags: &mut Diagnostics,
) -> Result<Vec<PathBuf>> {
    let dest_dir = platform_root.join(IMAGES_DIR);
    let mut written = Vec::new();

    let assets = descriptor
        .icons()
        .into_iter()
        .chain(descriptor.splash_screens());
    for asset in assets {
        match asset.target.as_deref() {
            Some(target) => {
                ensure_dir(&dest_dir)?;
                written.extend(copy_mrt_image(&asset, target, app_root, &dest_dir, diags)?);
            }
            None => match find_platform_image(asset.width, asset.height) {
                Some(platform) => {
                    ensure_dir(&dest_dir)?;
                    let dest = dest_dir.join(platform.dest);
                    if copy_image(&app_root.join(&asset.src), &dest, diags) {
                        written.push(dest);
                    }
                }
                None => diags.push(
                    Diagnostic::warning(format!(
                        "The following image is skipped due to unsupported size: {}",
                        asset.src
                    ))
                    .with_suggestion(suggestions::IMAGE_TARGET),
                ),
            },
        }
    }
    Ok(written)
}

/// Copy all resource-qualified variants of `asset` under the `target` name.
///
/// `logo.png`, `logo.scale-100.png` and `logo.scale-240.png` beside the source
/// become `<target>.scale-100.png` and `<target>.scale-240.png`; the unscaled
/// file counts as scale 100.
fn copy_mrt_image(
    asset: &ImageAsset,
    target: &str,
    app_root: &Path,
    dest_dir: &Path,
    diags: &mut Diagnostics,
) -> Result<Vec<PathBuf>> {
    let src = app_root.join(&asset.src);
    let src_dir = src.parent().unwrap_or(app_root);
    let stem = file_stem(&src);
    let ext = extension(&src);

    // Group 1 is the optional scale qualifier including its leading dot.
    let pattern = Regex::new(&format!(
        r"^{}(\.scale-[0-9]+)?{}",
        regex::escape(&stem),
        regex::escape(&ext)
    ))?;

    let mut variants = Vec::new();
    if src_dir.is_dir() {
        for entry in std::fs::read_dir(src_dir)
            .with_context(|| format!("failed to read directory: {}", src_dir.display()))?
        {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if let Some(caps) = pattern.captures(&file_name) {
                let scale = caps
                    .get(1)
                    .map_or(DEFAULT_SCALE, |m| m.as_str())
                    .to_string();
                variants.push((entry.path(), scale));
            }
        }
    }
    variants.sort();

    if variants.is_empty() {
        diags.push(Diagnostic::note(format!(
            "No images found for target: {}",
            target
        )));
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for (path, scale) in variants {
        let dest = dest_dir.join(format!("{}{}.png", target, scale));
        if copy_image(&path, &dest, diags) {
            written.push(dest);
        }
    }
    Ok(written)
}

/// Copy one image; a failure is reported as a warning.
fn copy_image(src: &Path, dest: &Path, diags: &mut Diagnostics) -> bool {
    match copy_file(src, dest) {
        Ok(()) => true,
        Err(e) => {
            diags.push(
                Diagnostic::warning(format!("Failed to copy image: {}", src.display()))
                    .with_context(format!("{:#}", e)),
            );
            false
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
