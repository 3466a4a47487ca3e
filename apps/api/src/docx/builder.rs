//! Paragraph descriptors and their WordprocessingML serialization.
//!
//! The filler never mutates paragraph XML in place; it produces
//! [`ParagraphSpec`] values (text, style reference, bold flag, tab stop) and
//! serializes each one exactly once.

/// 6.5" in twips — the standard text width on a US-letter page with 1"
/// margins, where the project date range right-justifies.
pub const RIGHT_TAB_POS_TWIPS: u32 = 9360;

/// How a generated paragraph gets its paragraph properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParaProps {
    /// No properties — the document default style (blank separator lines).
    None,
    /// Reuse the placeholder paragraph's raw `<w:pPr>` block, if any.
    Inherit(Option<String>),
    /// A named style by `w:styleId`.
    Style(String),
    /// A named style plus a right-aligned tab stop (client/date header line).
    StyleWithRightTab(String, u32),
}

/// One generated output paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpec {
    pub text: String,
    pub props: ParaProps,
    /// Forces every run of the paragraph bold.
    pub bold: bool,
}

impl ParagraphSpec {
    pub fn blank() -> Self {
        Self {
            text: String::new(),
            props: ParaProps::None,
            bold: false,
        }
    }

    pub fn inherited(text: impl Into<String>, ppr: Option<&str>) -> Self {
        Self {
            text: text.into(),
            props: ParaProps::Inherit(ppr.map(str::to_string)),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<w:p>");
        match &self.props {
            ParaProps::None => {}
            ParaProps::Inherit(Some(ppr)) => xml.push_str(ppr),
            ParaProps::Inherit(None) => {}
            ParaProps::Style(id) => {
                xml.push_str("<w:pPr><w:pStyle w:val=\"");
                xml.push_str(&xml_escape(id));
                xml.push_str("\"/></w:pPr>");
            }
            ParaProps::StyleWithRightTab(id, pos) => {
                xml.push_str("<w:pPr><w:pStyle w:val=\"");
                xml.push_str(&xml_escape(id));
                xml.push_str("\"/><w:tabs><w:tab w:val=\"right\" w:pos=\"");
                xml.push_str(&pos.to_string());
                xml.push_str("\"/></w:tabs></w:pPr>");
            }
        }
        if !self.text.is_empty() {
            xml.push_str("<w:r>");
            if self.bold {
                xml.push_str("<w:rPr><w:b/></w:rPr>");
            }
            // Tabs in the text become <w:tab/> elements between text runs.
            for (i, segment) in self.text.split('\t').enumerate() {
                if i > 0 {
                    xml.push_str("<w:tab/>");
                }
                if !segment.is_empty() {
                    xml.push_str("<w:t xml:space=\"preserve\">");
                    xml.push_str(&xml_escape(segment));
                    xml.push_str("</w:t>");
                }
            }
            xml.push_str("</w:r>");
        }
        xml.push_str("</w:p>");
        xml
    }
}

/// Escapes the five XML special characters for element and attribute content.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
