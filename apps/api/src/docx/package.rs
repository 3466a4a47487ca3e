//! ZIP-level access to a `.docx` package.
//!
//! All parts are loaded into memory up front; the template on disk is never
//! mutated. Saving emits a fresh archive, copying untouched parts verbatim.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::docx::FillError;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";

/// An opened `.docx` package: ordered list of (part name, bytes).
pub struct DocxPackage {
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxPackage {
    pub fn open(path: &Path) -> Result<Self, FillError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FillError> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, FillError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut buf)?;
            parts.push((entry.name().to_string(), buf));
        }
        Ok(Self { parts })
    }

    /// Returns a part decoded as UTF-8.
    pub fn part_str(&self, name: &str) -> Result<String, FillError> {
        let (_, bytes) = self
            .parts
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| FillError::MissingPart(name.to_string()))?;
        String::from_utf8(bytes.clone()).map_err(|_| FillError::PartEncoding(name.to_string()))
    }

    /// Replaces a part's content (or appends it if absent).
    pub fn set_part(&mut self, name: &str, bytes: Vec<u8>) {
        match self.parts.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = bytes,
            None => self.parts.push((name.to_string(), bytes)),
        }
    }

    /// Names of every header and footer XML part, in package order.
    pub fn header_footer_parts(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| {
                (n.starts_with("word/header") || n.starts_with("word/footer"))
                    && n.ends_with(".xml")
            })
            .map(str::to_string)
            .collect()
    }

    /// Writes the package to a new in-memory archive.
    pub fn save_to_bytes(&self) -> Result<Vec<u8>, FillError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, bytes) in &self.parts {
            writer.start_file(name.clone(), options)?;
            writer.write_all(bytes)?;
        }
        Ok(writer.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_package() -> DocxPackage {
        DocxPackage {
            parts: vec![
                (
                    "[Content_Types].xml".to_string(),
                    b"<Types/>".to_vec(),
                ),
                (
                    DOCUMENT_PART.to_string(),
                    b"<w:document><w:body/></w:document>".to_vec(),
                ),
                ("word/header1.xml".to_string(), b"<w:hdr/>".to_vec()),
                ("word/footer1.xml".to_string(), b"<w:ftr/>".to_vec()),
                ("word/media/image1.png".to_string(), vec![0x89, 0x50]),
            ],
        }
    }

    #[test]
    fn test_save_and_reopen_round_trip() {
        let pkg = sample_package();
        let bytes = pkg.save_to_bytes().unwrap();
        let reopened = DocxPackage::from_bytes(&bytes).unwrap();
        assert_eq!(
            reopened.part_str(DOCUMENT_PART).unwrap(),
            "<w:document><w:body/></w:document>"
        );
        assert_eq!(reopened.parts.len(), 5);
    }

    #[test]
    fn test_header_footer_parts_skips_media() {
        let pkg = sample_package();
        let parts = pkg.header_footer_parts();
        assert_eq!(parts, vec!["word/header1.xml", "word/footer1.xml"]);
    }

    #[test]
    fn test_missing_part_is_an_error() {
        let pkg = sample_package();
        let err = pkg.part_str("word/numbering.xml").unwrap_err();
        assert!(matches!(err, FillError::MissingPart(_)));
    }

    #[test]
    fn test_set_part_replaces_in_place() {
        let mut pkg = sample_package();
        pkg.set_part(DOCUMENT_PART, b"<w:document/>".to_vec());
        assert_eq!(pkg.part_str(DOCUMENT_PART).unwrap(), "<w:document/>");
        assert_eq!(pkg.parts.len(), 5);
    }
}
