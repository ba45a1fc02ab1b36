//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod sdk;

pub use config::{BuildJson, BuildOptions, BuildType};
pub use diagnostic::{Diagnostic, Diagnostics};
pub use sdk::{SdkProbe, WindowsKits};
