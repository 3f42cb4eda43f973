//! Author name substitution across a package's allow-listed parts

mod allow_list;
mod rewriter;
mod spec;

pub use allow_list::{AllowList, WORD_AUTHOR_PARTS};
pub use rewriter::{rewrite, PartReport, RewriteReport, Rewriter};
pub use spec::{replace_all, RewriteSpec};
