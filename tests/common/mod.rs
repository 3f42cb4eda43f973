//! Helpers for building and inspecting packages in tests

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00Jane Doe\x00\xff\xfe";

/// A small package with author names in several parts
pub fn sample_entries() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        (
            "[Content_Types].xml",
            b"<?xml version=\"1.0\"?><Types><!-- Jane Doe --></Types>".to_vec(),
        ),
        ("_rels/.rels", b"<Relationships/>".to_vec()),
        (
            "word/document.xml",
            b"<w:document><w:ins w:author=\"Jane Doe\"/><w:del w:author=\"Jane Doe\"/></w:document>"
                .to_vec(),
        ),
        (
            "word/styles.xml",
            b"<w:styles><!-- Jane Doe --></w:styles>".to_vec(),
        ),
        (
            "docProps/core.xml",
            b"<cp:coreProperties><dc:creator>Jane Doe</dc:creator></cp:coreProperties>".to_vec(),
        ),
        ("word/header3.xml", b"<w:hdr>Jane Doe</w:hdr>".to_vec()),
        ("word/media/image1.png", PNG_BYTES.to_vec()),
    ]
}

/// Build a package in memory. Names ending in '/' become directory entries.
pub fn build_package(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    build_package_with(entries, CompressionMethod::Deflated)
}

pub fn build_package_with(entries: &[(&str, Vec<u8>)], method: CompressionMethod) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

pub fn write_package(path: &Path, entries: &[(&str, Vec<u8>)]) {
    fs::write(path, build_package(entries)).unwrap();
}

/// Read every entry of a package, in archive order
pub fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        entries.push((file.name().to_string(), data));
    }
    entries
}

pub fn entry(entries: &[(String, Vec<u8>)], name: &str) -> Vec<u8> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, d)| d.clone())
        .unwrap_or_else(|| panic!("entry {} missing", name))
}

pub fn names(entries: &[(String, Vec<u8>)]) -> Vec<String> {
    entries.iter().map(|(n, _)| n.clone()).collect()
}

pub fn count(haystack: &[u8], needle: &str) -> usize {
    let needle = needle.as_bytes();
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

pub fn dir_listing(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
