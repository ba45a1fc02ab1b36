//! `appxprep build-config` command

use anyhow::Result;

use crate::cli::BuildConfigArgs;
use appxprep::core::ConfigXml;
use appxprep::ops::update_build_config;
use appxprep::util::{BuildJson, BuildOptions, BuildType};

pub fn execute(args: BuildConfigArgs) -> Result<()> {
    let root = super::platform_root(args.root)?;
    let config_path = args.config.unwrap_or_else(|| root.join("config.xml"));
    let config = ConfigXml::load(&config_path)?;

    let build_type = if args.release {
        BuildType::Release
    } else {
        BuildType::Debug
    };

    let mut options = match args.build_json {
        Some(path) => BuildJson::load(&path)?.windows_options(build_type),
        None => BuildOptions {
            build_type: Some(build_type),
            ..Default::default()
        },
    };
    options.merge(BuildOptions {
        package_certificate_key_file: args.certificate,
        package_thumbprint: args.thumbprint,
        ..Default::default()
    });

    let path = update_build_config(&root, &config, &options)?;
    println!("Wrote {}", path.display());

    Ok(())
}
