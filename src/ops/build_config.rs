//! Generate the signing and locale include for MSBuild.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::descriptor::{Descriptor, WithBuildOptions};
use crate::core::xml::{Document, Element};
use crate::util::config::{BuildOptions, BuildType};
use crate::util::fs::{absolutize, relative_path, to_slash, write_string};

/// Header written before the generated project.
pub const TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!--
    This file is automatically generated.
    Do not modify this file - YOUR CHANGES WILL BE ERASED!
-->
"#;

const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Certificate used when none is configured.
pub const DEFAULT_CERTIFICATE: &str = "CordovaApp_TemporaryKey.pfx";

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// The projitems file for a build type.
pub fn build_config_file_name(build_type: BuildType) -> &'static str {
    match build_type {
        BuildType::Debug => "CordovaAppDebug.projitems",
        BuildType::Release => "CordovaAppRelease.projitems",
    }
}

/// Render the projitems content.
///
/// `root` is the platform root; a configured certificate path is written
/// relative to it. Relative paths on either side are resolved against the
/// current directory first.
pub fn render_build_config(root: &Path, descriptor: &dyn Descriptor) -> Result<String> {
    let certificate = match descriptor.package_certificate_key_file() {
        Some(path) => {
            let certificate = absolutize(Path::new(path))?;
            to_slash(&relative_path(&absolutize(root)?, &certificate))
        }
        None => DEFAULT_CERTIFICATE.to_string(),
    };

    let mut properties = Element::new("PropertyGroup");
    properties.push(Element::new("PackageCertificateKeyFile").with_text(certificate.as_str()));
    if let Some(thumbprint) = descriptor.package_thumbprint() {
        properties.push(Element::new("PackageCertificateThumbprint").with_text(thumbprint));
    }
    properties.push(
        Element::new("DefaultLanguage")
            .with_text(descriptor.default_locale().unwrap_or(DEFAULT_LANGUAGE)),
    );

    let mut items = Element::new("ItemGroup");
    items.push(Element::new("None").with_attr("Include", certificate));

    let mut project = Element::new("Project").with_attr("xmlns", MSBUILD_NAMESPACE);
    project.push(properties);
    project.push(items);

    let body = Document::new(project)
        .to_xml_fragment(2)
        .context("failed to serialize build configuration")?;
    Ok(format!("{}{}", TEMPLATE, body))
}

/// Write the projitems for `options` into `root` and return its path.
///
/// Build options take precedence over the descriptor.
pub fn update_build_config(
    root: &Path,
    descriptor: &dyn Descriptor,
    options: &BuildOptions,
) -> Result<PathBuf> {
    let merged = WithBuildOptions::new(descriptor, options);
    let contents = render_build_config(root, &merged)?;

    let path = root.join(build_config_file_name(options.build_type()));
    tracing::info!("Writing {}", path.display());
    write_string(&path, &contents)?;
    Ok(path)
}
