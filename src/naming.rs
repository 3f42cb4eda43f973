//! Output naming convention

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Suffix appended to a source file's stem to name its output
pub const ANONYMIZED_SUFFIX: &str = " - Anonymized";

/// Extensions treated as Word packages in bulk mode, compared case-insensitively
pub const PACKAGE_EXTENSIONS: [&str; 1] = ["docx"];

/// Default output path: `report.docx` becomes `report - Anonymized.docx`.
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_else(|| OsStr::new(""));
    let mut name = stem.to_os_string();
    name.push(ANONYMIZED_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

/// Check whether a file name looks like a previous output
pub fn is_anonymized_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(OsStr::to_str)
        .is_some_and(|stem| stem.ends_with(ANONYMIZED_SUFFIX))
}

/// Check whether a path has a package extension
pub fn has_package_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| PACKAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("papers/thesis.docx")),
            PathBuf::from("papers/thesis - Anonymized.docx")
        );
    }

    #[test]
    fn test_default_output_keeps_extension_case() {
        assert_eq!(
            default_output_path(Path::new("Draft.DOCX")),
            PathBuf::from("Draft - Anonymized.DOCX")
        );
    }

    #[test]
    fn test_default_output_without_extension() {
        assert_eq!(
            default_output_path(Path::new("notes")),
            PathBuf::from("notes - Anonymized")
        );
    }

    #[test]
    fn test_default_output_only_strips_last_extension() {
        assert_eq!(
            default_output_path(Path::new("v1.2.docx")),
            PathBuf::from("v1.2 - Anonymized.docx")
        );
    }

    #[test]
    fn test_is_anonymized_output() {
        assert!(is_anonymized_output(Path::new("thesis - Anonymized.docx")));
        assert!(!is_anonymized_output(Path::new("thesis.docx")));
        assert!(!is_anonymized_output(Path::new("Anonymized thesis.docx")));
    }

    #[test]
    fn test_has_package_extension() {
        assert!(has_package_extension(Path::new("a.docx")));
        assert!(has_package_extension(Path::new("a.DocX")));
        assert!(!has_package_extension(Path::new("a.doc")));
        assert!(!has_package_extension(Path::new("docx")));
    }
}
