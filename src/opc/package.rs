//! OPC package extraction and repacking
//!
//! A package is unpacked entry by entry into a working directory, edited in
//! place, and then zipped back up in its original entry order.

use crate::error::{RewriteError, Stage};
use crate::opc::PartName;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use zip::read::ZipArchive;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Open a file as a zip archive
pub fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, RewriteError> {
    let file = File::open(path).map_err(|e| RewriteError::invalid_package(path, e))?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| RewriteError::invalid_package(path, e))
}

/// A package unpacked into a working directory
#[derive(Debug)]
pub struct ExtractedPackage {
    /// Directory holding the unpacked entries
    root: PathBuf,
    /// Entry names in archive order
    entries: Vec<PartName>,
}

impl ExtractedPackage {
    /// Unpack every entry of `archive` under `root`.
    ///
    /// All entry names are validated before anything is written, so a
    /// package with an unsafe or duplicated name leaves `root` empty.
    pub fn extract<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        source: &Path,
        root: &Path,
    ) -> Result<Self, RewriteError> {
        let entries = Self::read_entry_names(archive, source)?;

        for (i, name) in entries.iter().enumerate() {
            let target = root.join(name.to_relative_path());

            if name.is_directory() {
                fs::create_dir_all(&target)
                    .map_err(|e| RewriteError::write_failure(Stage::Extract, e))?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| RewriteError::write_failure(Stage::Extract, e))?;
            }

            let mut file = archive
                .by_index(i)
                .map_err(|e| RewriteError::zip_failure(Stage::Extract, e))?;
            let out = File::create(&target)
                .map_err(|e| RewriteError::write_failure(Stage::Extract, e))?;
            let mut out = BufWriter::new(out);
            io::copy(&mut file, &mut out)
                .and_then(|_| out.flush())
                .map_err(|e| RewriteError::write_failure(Stage::Extract, e))?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Get the working directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get entry names in archive order
    pub fn entries(&self) -> &[PartName] {
        &self.entries
    }

    /// Get the unpacked location of an entry
    pub fn path_of(&self, name: &PartName) -> PathBuf {
        self.root.join(name.to_relative_path())
    }

    /// Zip the working directory back up, returning the inner writer.
    ///
    /// Entries are written in the order they were extracted. Anything in
    /// the working directory that did not come from the archive is ignored.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W, RewriteError> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for name in &self.entries {
            if name.is_directory() {
                zip.add_directory(name.as_str(), options)
                    .map_err(|e| RewriteError::zip_failure(Stage::Repack, e))?;
                continue;
            }

            zip.start_file(name.as_str(), options)
                .map_err(|e| RewriteError::zip_failure(Stage::Repack, e))?;
            let mut file = File::open(self.path_of(name))
                .map_err(|e| RewriteError::write_failure(Stage::Repack, e))?;
            io::copy(&mut file, &mut zip)
                .map_err(|e| RewriteError::write_failure(Stage::Repack, e))?;
        }

        zip.finish()
            .map_err(|e| RewriteError::zip_failure(Stage::Repack, e))
    }

    // === Private methods ===

    fn read_entry_names<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        source: &Path,
    ) -> Result<Vec<PartName>, RewriteError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let file = archive
                .by_index(i)
                .map_err(|e| RewriteError::invalid_package(source, e))?;
            let name = PartName::new(file.name())
                .map_err(|reason| RewriteError::invalid_package(source, reason))?;
            if !seen.insert(name.as_str().trim_end_matches('/').to_string()) {
                return Err(RewriteError::invalid_package(
                    source,
                    format!("duplicate entry '{}'", name),
                ));
            }
            entries.push(name);
        }

        Ok(entries)
    }
}
