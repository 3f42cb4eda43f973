//! The set of part names eligible for substitution

use crate::opc::PartName;

/// Word parts that commonly carry author names.
///
/// Only the first two header and footer parts are listed. Documents
/// with `word/header3.xml` and beyond are partially anonymized unless
/// [`AllowList::include_numbered_headers_footers`] is enabled.
pub const WORD_AUTHOR_PARTS: [&str; 11] = [
    "word/document.xml",
    "word/comments.xml",
    "word/footnotes.xml",
    "word/endnotes.xml",
    "word/styles.xml",
    "word/settings.xml",
    "docProps/core.xml",
    "word/header1.xml",
    "word/header2.xml",
    "word/footer1.xml",
    "word/footer2.xml",
];

/// Names of parts to rewrite. Matching is exact and case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowList {
    names: Vec<String>,
    numbered_headers_footers: bool,
}

impl AllowList {
    /// Create an allow-list from arbitrary part names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            numbered_headers_footers: false,
        }
    }

    /// The standard list, [`WORD_AUTHOR_PARTS`]
    pub fn word() -> Self {
        Self::new(WORD_AUTHOR_PARTS)
    }

    /// Also select every `word/header<N>.xml` and `word/footer<N>.xml`
    pub fn include_numbered_headers_footers(mut self, enabled: bool) -> Self {
        self.numbered_headers_footers = enabled;
        self
    }

    /// Get the listed names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check whether an entry should be rewritten
    pub fn selects(&self, name: &PartName) -> bool {
        if name.is_directory() {
            return false;
        }
        if self.names.iter().any(|n| n == name.as_str()) {
            return true;
        }
        self.numbered_headers_footers
            && (name.is_numbered_part("word", "header") || name.is_numbered_part("word", "footer"))
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::word()
    }
}
