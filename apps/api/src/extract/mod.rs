//! Raw text extraction from uploaded CV files.
//!
//! Dispatch is strictly on the (case-insensitive) file extension: `.pdf`
//! goes through the text layer of every page in page order, `.docx` joins
//! the paragraph texts of `word/document.xml` with newlines. Anything else
//! is an unsupported format.

pub mod normalize;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::docx::document::paragraph_texts;
use crate::docx::package::{DocxPackage, DOCUMENT_PART};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file extension '{0}'")]
    UnsupportedFormat(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX text extraction failed: {0}")]
    Docx(String),
}

/// Extracts and normalizes the text content of a CV file.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let raw = match ext.as_str() {
        "pdf" => extract_pdf(path)?,
        "docx" => extract_docx(path)?,
        other => return Err(ExtractError::UnsupportedFormat(other.to_string())),
    };

    let text = normalize::clean_text(&raw);
    debug!("Extracted {} characters from {}", text.len(), path.display());
    Ok(text)
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path)
        .map(|text| text.trim().to_string())
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let pkg = DocxPackage::open(path).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let document = pkg
        .part_str(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    Ok(paragraph_texts(&document).join("\n"))
}
