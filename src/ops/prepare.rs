//! Implementation of `appxprep prepare`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::appx;
use crate::core::config_xml::ConfigXml;
use crate::core::descriptor::{Descriptor, WithBuildOptions};
use crate::core::dialect::{Dialect, DIALECTS, PROJECT_WINDOWS10};
use crate::ops::images::copy_images;
use crate::ops::project_version::{host_supports_uap, update_project_version};
use crate::util::config::BuildOptions;
use crate::util::diagnostic::{Diagnostic, Diagnostics};
use crate::util::fs::{read_to_string, write_string};
use crate::util::sdk::{SdkProbe, SdkRange};

/// Options for preparing a platform directory.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Platform root holding the manifests and the project files
    pub root: PathBuf,

    /// Descriptor file, `<root>/config.xml` if not set
    pub config: Option<PathBuf>,

    /// Update the Windows 10 project with installed SDK versions
    pub update_project: bool,

    /// Options layered over the descriptor (publisher id)
    pub build_options: BuildOptions,
}

impl PrepareOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PrepareOptions {
            root: root.into(),
            config: None,
            update_project: host_supports_uap(),
            build_options: BuildOptions::default(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join("config.xml"))
    }

    /// Where image sources are resolved from (`<root>/../..`).
    pub fn app_root(&self) -> PathBuf {
        self.root.join("..").join("..")
    }
}

/// What a prepare run changed.
#[derive(Debug, Default)]
pub struct PrepareReport {
    /// Manifests that were rewritten, in processing order
    pub manifests: Vec<PathBuf>,

    /// SDK range written to the Windows 10 project, if any
    pub sdk_range: Option<SdkRange>,

    /// Copied images
    pub images: Vec<PathBuf>,

    /// Warnings and notes collected along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Load the descriptor and prepare the platform directory.
pub fn prepare(opts: &PrepareOptions, probe: &dyn SdkProbe) -> Result<PrepareReport> {
    let config = ConfigXml::load(&opts.config_path())?;
    let descriptor = WithBuildOptions::new(&config, &opts.build_options);
    apply_platform_config(opts, &descriptor, probe)
}

/// Update every manifest, the project SDK versions and the images.
///
/// A manifest that cannot be transformed aborts the run. Failing to update
/// the project file is reported as a warning.
pub fn apply_platform_config(
    opts: &PrepareOptions,
    descriptor: &dyn Descriptor,
    probe: &dyn SdkProbe,
) -> Result<PrepareReport> {
    let mut diags = Diagnostics::new();
    let mut report = PrepareReport::default();

    for dialect in DIALECTS {
        let path = opts.root.join(dialect.file_name());
        update_manifest_file(&path, descriptor, dialect, &mut diags)?;
        report.manifests.push(path);
    }

    if opts.update_project {
        let project = opts.root.join(PROJECT_WINDOWS10);
        match update_project_version(&project, probe) {
            Ok(range) => report.sdk_range = range,
            Err(e) => diags.push(
                Diagnostic::warning(format!(
                    "failed to apply UAP versions to {}",
                    project.display()
                ))
                .with_context(format!("{:#}", e)),
            ),
        }
    }

    report.images = copy_images(descriptor, &opts.app_root(), &opts.root, &mut diags)?;
    report.diagnostics = diags.into_vec();
    Ok(report)
}

/// Rewrite one manifest file in place.
pub fn update_manifest_file(
    path: &Path,
    descriptor: &dyn Descriptor,
    dialect: Dialect,
    diags: &mut Diagnostics,
) -> Result<()> {
    tracing::info!("Updating {}", path.display());
    let contents = read_to_string(path)?;
    let xml = appx::transform_str(&contents, descriptor, dialect, path, diags)
        .with_context(|| format!("failed to update manifest {}", path.display()))?;
    write_string(path, &xml)
}
