//! Bulk processing of a folder of packages
//!
//! Each file is rewritten independently. A failure is recorded in the
//! report and the remaining files are still processed.

use crate::error::{Error, Result, RewriteError};
use crate::naming::{default_output_path, has_package_extension, is_anonymized_output};
use crate::rewrite::{RewriteReport, RewriteSpec, Rewriter};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome for one file in a bulk run
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub result: std::result::Result<RewriteReport, RewriteError>,
}

impl FileOutcome {
    /// Check if the file was rewritten
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Progress of a bulk run, reported per file
#[derive(Clone, Copy, Debug)]
pub enum Progress<'a> {
    /// About to rewrite this source
    Started(&'a Path),
    /// Finished a file, successfully or not
    Finished(&'a FileOutcome),
}

/// Results of a bulk run, in processing order
#[derive(Debug, Default)]
pub struct BulkReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BulkReport {
    /// Outcomes that succeeded
    pub fn successes(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Outcomes that failed
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Check if every file succeeded
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_success)
    }
}

/// Runs a [`Rewriter`] over every eligible package in a folder
#[derive(Clone, Debug, Default)]
pub struct BulkDriver {
    rewriter: Rewriter,
}

impl BulkDriver {
    /// Create a new driver
    pub fn new(rewriter: Rewriter) -> Self {
        Self { rewriter }
    }

    /// List eligible packages in `folder`, sorted by file name.
    ///
    /// Only regular files directly inside the folder are considered.
    /// Previous outputs (stem ending in the anonymized suffix) are skipped.
    pub fn find_packages(folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(Error::NotADirectory(folder.to_path_buf()));
        }

        let mut packages = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() {
                continue;
            }
            if !has_package_extension(&path) {
                continue;
            }
            if is_anonymized_output(&path) {
                log::debug!("skipping previous output {}", path.display());
                continue;
            }
            packages.push(path);
        }

        if packages.is_empty() {
            return Err(Error::NoPackages(folder.to_path_buf()));
        }

        packages.sort();
        Ok(packages)
    }

    /// Rewrite every package in `folder` next to its source.
    pub fn run<F>(&self, folder: &Path, spec: &RewriteSpec, on_progress: F) -> Result<BulkReport>
    where
        F: FnMut(Progress<'_>),
    {
        let packages = Self::find_packages(folder)?;
        log::info!("processing {} packages in {}", packages.len(), folder.display());
        Ok(self.run_packages(packages, spec, on_progress))
    }

    /// Rewrite each of `packages` next to its source.
    ///
    /// `on_progress` sees each file start, then its outcome, before the
    /// next file begins.
    pub fn run_packages<F>(&self, packages: Vec<PathBuf>, spec: &RewriteSpec, mut on_progress: F) -> BulkReport
    where
        F: FnMut(Progress<'_>),
    {
        let mut report = BulkReport::default();
        for source in packages {
            on_progress(Progress::Started(&source));
            let destination = default_output_path(&source);
            let result = self.rewriter.rewrite(&source, &destination, spec);

            match &result {
                Ok(r) => log::info!(
                    "{}: {} replacements in {} parts",
                    source.display(),
                    r.replacements(),
                    r.parts.len()
                ),
                Err(e) => log::warn!("{}: {}", source.display(), e),
            }

            let outcome = FileOutcome {
                source,
                destination,
                result,
            };
            on_progress(Progress::Finished(&outcome));
            report.outcomes.push(outcome);
        }

        report
    }
}
