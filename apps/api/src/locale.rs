use serde::Deserialize;

/// Output language selector. Chooses the Word template, the extraction
/// instruction language, and the localized literals inserted by the filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Parses a locale tag, falling back to French (the default template).
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Locale::En,
            _ => Locale::Fr,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// File name of the pre-authored template for this locale.
    pub fn template_file(&self) -> &'static str {
        match self {
            Locale::Fr => "template_cv_p.docx",
            Locale::En => "template_cv_p_en.docx",
        }
    }

    /// Literal used for missing label-like display fields.
    pub fn not_specified(&self) -> &'static str {
        match self {
            Locale::Fr => "Non spécifié",
            Locale::En => "Not specified",
        }
    }

    /// Literal used for missing year-like fields.
    pub fn not_available(&self) -> &'static str {
        "N/A"
    }

    /// Heading inserted above a project's achievement bullets.
    pub fn achievements_heading(&self) -> &'static str {
        match self {
            Locale::Fr => "Réalisations :",
            Locale::En => "Achievements :",
        }
    }
}
