//! Core data structures for appxprep.
//!
//! This module contains the foundational types used throughout appxprep:
//! - Platform versions
//! - The app descriptor and its `config.xml` implementation
//! - Manifest dialects
//! - The owned XML tree the mutators operate on

pub mod config_xml;
pub mod descriptor;
pub mod dialect;
pub mod version;
pub mod xml;

pub use config_xml::ConfigXml;
pub use descriptor::{Descriptor, ImageAsset, Preference, WithBuildOptions};
pub use dialect::{Dialect, DIALECTS, PROJECT_WINDOWS10};
pub use version::{pad_version, Version, BASE_UAP_VERSION};
pub use xml::{Document, Element, Node};
