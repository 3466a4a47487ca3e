//! Style catalog parsed from `word/styles.xml`.
//!
//! The filler assigns styles by display name (the name authors see in Word),
//! while paragraph properties reference the internal `w:styleId`. A named
//! style missing from the template aborts the whole fill.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::docx::FillError;

/// Maps style display names to their `w:styleId`.
pub struct StyleCatalog {
    by_name: HashMap<String, String>,
}

impl StyleCatalog {
    pub fn parse(styles_xml: &str) -> Result<Self, FillError> {
        let mut reader = Reader::from_str(styles_xml);
        reader.trim_text(true);
        let mut buf = Vec::new();
        let mut by_name = HashMap::new();
        let mut current_id: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:style" => {
                    current_id = attr_value(&e, b"w:styleId");
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => {
                    current_id = None;
                }
                // w:lsdException also carries w:name attributes, but only as
                // an attribute of itself; the w:name *element* occurs inside
                // w:style only.
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"w:name" => {
                    if let (Some(id), Some(name)) = (&current_id, attr_value(&e, b"w:val")) {
                        by_name.insert(name, id.clone());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(FillError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
        Ok(Self { by_name })
    }

    /// Resolves a style display name to its id; missing styles are fatal.
    pub fn resolve(&self, name: &str) -> Result<&str, FillError> {
        self.by_name
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| FillError::StyleNotFound(name.to_string()))
    }
}

fn attr_value(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    e.try_get_attribute(key)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}
