//! Entry name handling for OPC packages

use std::fmt;
use std::path::PathBuf;

/// The name of an entry inside a package, exactly as stored in the zip.
///
/// Names are relative and use '/' as the separator, e.g. `word/document.xml`.
/// A trailing '/' marks a directory entry. Construction rejects any
/// name that could resolve outside the directory it is extracted into.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartName {
    name: String,
}

impl PartName {
    /// Create a new PartName from a raw zip entry name.
    pub fn new(name: &str) -> Result<Self, String> {
        if name.is_empty() {
            return Err("empty entry name".into());
        }
        if name.starts_with('/') {
            return Err(format!("entry '{}' is an absolute path", name));
        }
        if name.contains('\\') {
            return Err(format!("entry '{}' contains a backslash", name));
        }

        let trimmed = name.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(format!("entry '{}' has no path segments", name));
        }

        for (i, segment) in trimmed.split('/').enumerate() {
            match segment {
                "" => {
                    return Err(format!(
                        "invalid entry '{}': contains double slashes",
                        name
                    ))
                }
                "." | ".." => {
                    return Err(format!("entry '{}' contains a relative segment", name))
                }
                s if i == 0 && s.contains(':') => {
                    return Err(format!("entry '{}' has a drive prefix", name))
                }
                _ => {}
            }
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Check if this entry is a directory
    pub fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Get the file name portion
    pub fn file_name(&self) -> &str {
        let trimmed = self.name.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Get the parent directory, without a trailing '/'
    pub fn parent(&self) -> Option<&str> {
        let trimmed = self.name.trim_end_matches('/');
        trimmed.rfind('/').map(|pos| &trimmed[..pos])
    }

    /// Relative filesystem path for this entry inside an extraction root.
    pub fn to_relative_path(&self) -> PathBuf {
        self.name
            .trim_end_matches('/')
            .split('/')
            .collect::<PathBuf>()
    }

    /// Check for a numbered part such as `word/header3.xml`.
    ///
    /// For `stem = "header"` and a parent of `word`, matches any run of
    /// ASCII digits between the stem and `.xml`, however long.
    pub fn is_numbered_part(&self, parent: &str, stem: &str) -> bool {
        if self.is_directory() || self.parent() != Some(parent) {
            return false;
        }
        self.file_name()
            .strip_prefix(stem)
            .and_then(|rest| rest.strip_suffix(".xml"))
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
