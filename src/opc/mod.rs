//! Open Packaging Convention (OPC) implementation
//!
//! This module handles the ZIP-based package format used by DOCX files.

mod package;
mod part_name;

pub use package::{open_archive, ExtractedPackage};
pub use part_name::PartName;
