//! The archive rewrite pipeline
//!
//! Extract, transform, repack, persist. The working directory and the
//! temporary output file are both scoped to a single call and removed on
//! drop, on every exit path.

use crate::error::{RewriteError, Stage};
use crate::opc::{open_archive, ExtractedPackage, PartName};
use crate::rewrite::{AllowList, RewriteSpec};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempDir};

const WORK_DIR_PREFIX: &str = ".docx-anonymize-";
const OUTPUT_TEMP_SUFFIX: &str = ".partial";

/// Replacement count for a single part
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartReport {
    pub name: PartName,
    pub replacements: usize,
}

/// Summary of a finished rewrite
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Number of entries carried into the output
    pub entries: usize,
    /// Allow-listed parts that were present in the source, in archive order
    pub parts: Vec<PartReport>,
}

impl RewriteReport {
    /// Total replacements across all parts
    pub fn replacements(&self) -> usize {
        self.parts.iter().map(|p| p.replacements).sum()
    }
}

/// Rewrites packages using a fixed allow-list
#[derive(Clone, Debug, Default)]
pub struct Rewriter {
    allow_list: AllowList,
    scratch_root: Option<PathBuf>,
}

impl Rewriter {
    /// Create a rewriter for the given allow-list
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            scratch_root: None,
        }
    }

    /// Create working directories under `root` instead of the system temp dir
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Get the allow-list
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Write a copy of `source` to `destination` with `spec` applied to
    /// every allow-listed part.
    ///
    /// On error nothing is created at `destination`, and an existing file
    /// there is left as it was.
    pub fn rewrite(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        spec: &RewriteSpec,
    ) -> Result<RewriteReport, RewriteError> {
        self.run(source.as_ref(), destination.as_ref(), spec, |_| Ok(()))
    }

    // === Private methods ===

    /// The pipeline, with `before_repack` run on the transformed working copy.
    fn run<F>(
        &self,
        source: &Path,
        destination: &Path,
        spec: &RewriteSpec,
        before_repack: F,
    ) -> Result<RewriteReport, RewriteError>
    where
        F: FnOnce(&ExtractedPackage) -> io::Result<()>,
    {
        let mut archive = open_archive(source)?;
        let output = Self::create_output(destination)?;
        let work = self.create_work_dir()?;

        // Start -> Extracted
        let package = ExtractedPackage::extract(&mut archive, source, work.path())?;
        drop(archive);

        // Extracted -> Transformed
        let parts = self.transform(&package, spec)?;
        before_repack(&package).map_err(|e| RewriteError::write_failure(Stage::Repack, e))?;

        // Transformed -> Repacked
        let output = Self::repack(&package, output)?;

        // Repacked -> Done
        Self::copy_permissions(&output, source, destination)?;
        output
            .persist(destination)
            .map_err(|e| RewriteError::write_failure(Stage::Persist, e.error))?;

        Ok(RewriteReport {
            entries: package.entries().len(),
            parts,
        })
    }

    /// Give the output the destination's existing permissions, or the
    /// source's when the destination is new.
    fn copy_permissions(
        output: &NamedTempFile,
        source: &Path,
        destination: &Path,
    ) -> Result<(), RewriteError> {
        let permissions = fs::metadata(destination)
            .or_else(|_| fs::metadata(source))
            .map(|m| m.permissions())
            .map_err(|e| RewriteError::write_failure(Stage::Persist, e))?;
        output
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| RewriteError::write_failure(Stage::Persist, e))
    }

    fn create_output(destination: &Path) -> Result<NamedTempFile, RewriteError> {
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(RewriteError::DestinationUnwritable {
                path: destination.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ),
            });
        }

        Builder::new()
            .prefix(WORK_DIR_PREFIX)
            .suffix(OUTPUT_TEMP_SUFFIX)
            .tempfile_in(parent)
            .map_err(|source| RewriteError::DestinationUnwritable {
                path: destination.to_path_buf(),
                source,
            })
    }

    fn create_work_dir(&self) -> Result<TempDir, RewriteError> {
        let mut builder = Builder::new();
        builder.prefix(WORK_DIR_PREFIX);
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        dir.map_err(|e| RewriteError::write_failure(Stage::Extract, e))
    }

    fn transform(
        &self,
        package: &ExtractedPackage,
        spec: &RewriteSpec,
    ) -> Result<Vec<PartReport>, RewriteError> {
        let mut parts = Vec::new();

        for name in package.entries() {
            if !self.allow_list.selects(name) {
                continue;
            }

            let path = package.path_of(name);
            let data = fs::read(&path).map_err(|e| RewriteError::write_failure(Stage::Transform, e))?;
            let (rewritten, replacements) = spec.apply(&data);
            if replacements > 0 {
                fs::write(&path, rewritten)
                    .map_err(|e| RewriteError::write_failure(Stage::Transform, e))?;
            }

            parts.push(PartReport {
                name: name.clone(),
                replacements,
            });
        }

        Ok(parts)
    }

    fn repack(
        package: &ExtractedPackage,
        mut output: NamedTempFile,
    ) -> Result<NamedTempFile, RewriteError> {
        let writer = BufWriter::new(output.as_file_mut());
        let mut writer = package.write_to(writer)?;
        writer
            .flush()
            .map_err(|e| RewriteError::write_failure(Stage::Repack, e))?;
        drop(writer);

        output
            .as_file()
            .sync_all()
            .map_err(|e| RewriteError::write_failure(Stage::Repack, e))?;
        Ok(output)
    }
}

/// Rewrite `source` into `destination` using the standard Word allow-list.
pub fn rewrite(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    old_text: &str,
    new_text: &str,
) -> Result<(), RewriteError> {
    let spec = RewriteSpec::new(old_text, new_text)?;
    Rewriter::default().rewrite(source, destination, &spec).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_package(path: &Path) {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in [
            ("word/document.xml", &b"<w:t>Jane Doe</w:t>"[..]),
            ("word/media/image1.png", &b"\x89PNG"[..]),
        ] {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        fs::write(path, zip.finish().unwrap().into_inner()).unwrap();
    }

    fn listing(path: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_failed_repack_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let source = dir.path().join("thesis.docx");
        let output = dir.path().join("out.docx");
        write_package(&source);

        let rewriter = Rewriter::default().with_scratch_root(scratch.path());
        let spec = RewriteSpec::new("Jane Doe", "Anonymous").unwrap();
        let err = rewriter
            .run(&source, &output, &spec, |package| {
                let image = PartName::new("word/media/image1.png").unwrap();
                fs::remove_file(package.path_of(&image))
            })
            .unwrap_err();

        assert!(matches!(
            err,
            RewriteError::PartialWriteFailure {
                stage: Stage::Repack,
                ..
            }
        ));
        assert!(!output.exists());
        assert_eq!(listing(dir.path()), vec!["thesis.docx"]);
        assert!(listing(scratch.path()).is_empty());
    }

    #[test]
    fn test_rewrite_reports_entries() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("thesis.docx");
        let output = dir.path().join("out.docx");
        write_package(&source);

        let spec = RewriteSpec::new("Jane Doe", "Anonymous").unwrap();
        let report = Rewriter::default().rewrite(&source, &output, &spec).unwrap();

        assert_eq!(report.entries, 2);
        assert_eq!(report.replacements(), 1);
        assert_eq!(listing(dir.path()), vec!["out.docx", "thesis.docx"]);
    }
}
