//! `appxprep prepare` command

use anyhow::Result;

use crate::cli::PrepareArgs;
use appxprep::ops::{prepare, PrepareOptions};
use appxprep::util::diagnostic::emit;
use appxprep::util::WindowsKits;

pub fn execute(args: PrepareArgs, color: bool) -> Result<()> {
    let root = super::platform_root(args.root)?;
    let mut options = PrepareOptions::new(root);
    options.config = args.config;
    options.build_options.publisher_id = args.publisher_id;
    if args.skip_sdk {
        options.update_project = false;
    }

    let report = prepare(&options, &WindowsKits::from_env())?;

    for diagnostic in &report.diagnostics {
        emit(diagnostic, color);
    }

    println!("Updated {} manifests", report.manifests.len());
    if let Some(range) = report.sdk_range {
        println!("Targeting UAP {} (min {})", range.max, range.min);
    }
    if !report.images.is_empty() {
        println!("Copied {} images", report.images.len());
    }

    Ok(())
}
