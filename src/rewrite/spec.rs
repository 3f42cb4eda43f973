//! Rewrite spec and literal byte replacement

use crate::error::RewriteError;
use memchr::memmem::Finder;

/// An (old, new) text pair to substitute
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteSpec {
    old_text: String,
    new_text: String,
}

impl RewriteSpec {
    /// Create a new spec. An empty `old_text` is rejected.
    pub fn new(old_text: impl Into<String>, new_text: impl Into<String>) -> Result<Self, RewriteError> {
        let old_text = old_text.into();
        if old_text.is_empty() {
            return Err(RewriteError::InvalidRewriteSpec(
                "text to replace must not be empty".into(),
            ));
        }
        Ok(Self {
            old_text,
            new_text: new_text.into(),
        })
    }

    /// Get the text being replaced
    pub fn old_text(&self) -> &str {
        &self.old_text
    }

    /// Get the replacement text
    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    /// Apply the substitution to a byte buffer, returning the result and the
    /// number of replacements made.
    pub fn apply(&self, data: &[u8]) -> (Vec<u8>, usize) {
        replace_all(data, self.old_text.as_bytes(), self.new_text.as_bytes())
    }
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to right.
///
/// An empty needle matches nothing.
pub fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    if needle.is_empty() {
        return (haystack.to_vec(), 0);
    }

    let finder = Finder::new(needle);
    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    let mut count = 0;

    for pos in finder.find_iter(haystack) {
        out.extend_from_slice(&haystack[last..pos]);
        out.extend_from_slice(replacement);
        last = pos + needle.len();
        count += 1;
    }
    out.extend_from_slice(&haystack[last..]);

    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_occurrences() {
        let (out, count) = replace_all(b"<a>Jane Doe</a><b>Jane Doe</b>", b"Jane Doe", b"Anonymous");
        assert_eq!(out, b"<a>Anonymous</a><b>Anonymous</b>");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let (out, count) = replace_all(b"aaaa", b"aa", b"b");
        assert_eq!(out, b"bb");
        assert_eq!(count, 2);

        let (out, count) = replace_all(b"aaa", b"aa", b"b");
        assert_eq!(out, b"ba");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_case_sensitive() {
        let (out, count) = replace_all(b"jane doe JANE DOE", b"Jane Doe", b"X");
        assert_eq!(out, b"jane doe JANE DOE");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_utf8_names() {
        let spec = RewriteSpec::new("Zoë Müller", "Anonyme").unwrap();
        let (out, count) = spec.apply("w:author=\"Zoë Müller\"".as_bytes());
        assert_eq!(out, b"w:author=\"Anonyme\"");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replacement_may_be_empty() {
        let spec = RewriteSpec::new("Jane", "").unwrap();
        let (out, count) = spec.apply(b"Jane Doe");
        assert_eq!(out, b" Doe");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replacement_containing_needle() {
        let spec = RewriteSpec::new("Doe", "Doe Jr").unwrap();
        let (once, _) = spec.apply(b"Jane Doe");
        let (twice, count) = spec.apply(&once);
        assert_eq!(twice, b"Jane Doe Jr Jr");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_old_text_rejected() {
        let err = RewriteSpec::new("", "Anonymous").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidRewriteSpec(_)));
    }

    #[test]
    fn test_empty_needle_is_noop() {
        let (out, count) = replace_all(b"abc", b"", b"x");
        assert_eq!(out, b"abc");
        assert_eq!(count, 0);
    }
}
