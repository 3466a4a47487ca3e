//! Paragraph-level view of a WordprocessingML part.
//!
//! An XML part is split into an alternating sequence of raw pass-through
//! chunks and paragraphs. Each paragraph keeps its original markup so that
//! untouched paragraphs can be re-emitted byte-for-byte, plus the derived
//! plain text (for placeholder matching) and the raw `<w:pPr>` block (so
//! generated paragraphs can inherit the placeholder paragraph's style).

use quick_xml::events::Event;
use quick_xml::Reader;

/// One `<w:p>` element of a part.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Original markup, `<w:p …>…</w:p>` or self-closing `<w:p/>`.
    pub raw: String,
    /// Concatenated run text; `<w:tab/>` becomes `\t`, `<w:br/>`/`<w:cr/>`
    /// become `\n` (python-docx's reading of paragraph text).
    pub text: String,
    /// Raw `<w:pPr>…</w:pPr>` block, if present.
    pub ppr: Option<String>,
}

/// A slice of a part: either markup outside any paragraph, or a paragraph.
#[derive(Debug, Clone)]
pub enum Chunk {
    Raw(String),
    Para(Paragraph),
}

/// Splits a part into chunks. Paragraphs never nest in WordprocessingML, so
/// the first `</w:p>` after an opening `<w:p>` always closes it.
pub fn split_paragraphs(xml: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_paragraph_open(xml, pos) {
        if start > pos {
            chunks.push(Chunk::Raw(xml[pos..start].to_string()));
        }
        let end = paragraph_end(xml, start);
        let raw = &xml[start..end];
        chunks.push(Chunk::Para(parse_paragraph(raw)));
        pos = end;
    }
    if pos < xml.len() {
        chunks.push(Chunk::Raw(xml[pos..].to_string()));
    }
    chunks
}

/// Extracts the plain text of every paragraph, in document order.
pub fn paragraph_texts(xml: &str) -> Vec<String> {
    split_paragraphs(xml)
        .into_iter()
        .filter_map(|c| match c {
            Chunk::Para(p) => Some(p.text),
            Chunk::Raw(_) => None,
        })
        .collect()
}

/// Finds the byte offset of the next `<w:p>` open tag at or after `from`.
/// Requires the name to end there (`<w:pPr>`, `<w:proofErr>` etc. do not
/// match).
fn find_paragraph_open(xml: &str, from: usize) -> Option<usize> {
    let bytes = xml.as_bytes();
    let mut search = from;
    while let Some(rel) = xml[search..].find("<w:p") {
        let start = search + rel;
        match bytes.get(start + 4) {
            Some(b' ') | Some(b'>') | Some(b'/') => return Some(start),
            _ => search = start + 4,
        }
    }
    None
}

/// Returns the byte offset one past the end of the paragraph opening at
/// `start` (handles self-closing `<w:p/>`).
fn paragraph_end(xml: &str, start: usize) -> usize {
    let tag_end = xml[start..]
        .find('>')
        .map(|i| start + i)
        .unwrap_or(xml.len() - 1);
    if xml.as_bytes()[tag_end.saturating_sub(1)] == b'/' {
        return tag_end + 1;
    }
    const CLOSE: &str = "</w:p>";
    xml[tag_end..]
        .find(CLOSE)
        .map(|i| tag_end + i + CLOSE.len())
        .unwrap_or(xml.len())
}

/// Parses one paragraph's markup into text and paragraph properties.
fn parse_paragraph(raw: &str) -> Paragraph {
    Paragraph {
        raw: raw.to_string(),
        text: extract_text(raw),
        ppr: extract_ppr(raw),
    }
}

fn extract_text(raw: &str) -> String {
    let mut reader = Reader::from_str(raw);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;
    // Tabs and breaks only count as text inside a run: a <w:tab/> under
    // <w:pPr><w:tabs> is a tab-stop definition, not content.
    let mut in_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:r" => in_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => in_run = false,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                if let Ok(s) = t.unescape() {
                    text.push_str(&s);
                }
            }
            Ok(Event::Empty(e)) if in_run => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    text
}

fn extract_ppr(raw: &str) -> Option<String> {
    let start = raw.find("<w:pPr")?;
    let tag_end = start + raw[start..].find('>')?;
    if raw.as_bytes()[tag_end - 1] == b'/' {
        return Some(raw[start..=tag_end].to_string());
    }
    const CLOSE: &str = "</w:pPr>";
    let close = tag_end + raw[tag_end..].find(CLOSE)? + CLOSE.len();
    Some(raw[start..close].to_string())
}
