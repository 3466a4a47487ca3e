//! Word template handling.
//!
//! A `.docx` file is a ZIP archive of XML parts; the body lives in
//! `word/document.xml`, headers and footers in `word/header*.xml` /
//! `word/footer*.xml`, and the style catalog in `word/styles.xml`.
//! `docx-rs` is writer-only, so reading and rewriting the template is done
//! with `zip` + `quick-xml` directly. Paragraphs without a recognized
//! placeholder are passed through byte-for-byte; placeholder paragraphs are
//! rebuilt from [`builder::ParagraphSpec`] descriptors and the part is
//! emitted once.

pub mod builder;
pub mod document;
pub mod fill;
pub mod package;
pub mod styles;

pub use fill::fill;
pub use package::DocxPackage;

use thiserror::Error;

/// Errors raised while reading or filling a Word document.
#[derive(Debug, Error)]
pub enum FillError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document part '{0}' is not valid UTF-8")]
    PartEncoding(String),

    #[error("missing document part: {0}")]
    MissingPart(String),

    #[error("style '{0}' not found in the template style catalog")]
    StyleNotFound(String),
}
