//! # docx-anonymize
//!
//! Replace an author's name inside DOCX packages.
//!
//! ## Features
//!
//! - Literal byte substitution across a fixed list of Word parts
//! - Every other entry is carried through untouched
//! - Atomic output: nothing is left at the destination on failure
//! - Bulk mode over a folder with per-file error isolation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_anonymize::rewrite;
//!
//! rewrite("thesis.docx", "thesis - Anonymized.docx", "Jane Doe", "Anonymous")?;
//! ```
//!
//! Known limitation: only `header1`, `header2`, `footer1` and `footer2` are
//! covered by the default allow-list. See [`AllowList`].

pub mod bulk;
pub mod cli;
pub mod error;
pub mod naming;
pub mod opc;
pub mod resolve;
pub mod rewrite;

pub use error::{Error, Result, RewriteError, Stage};
pub use opc::PartName;
pub use rewrite::{rewrite, AllowList, RewriteReport, RewriteSpec, Rewriter, WORD_AUTHOR_PARTS};
