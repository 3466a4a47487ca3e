//! Structured CV record — the contract between the field extractor and the
//! template filler.
//!
//! Field names mirror the `{{KEY}}` placeholder tokens in the Word templates,
//! so the serde rename attributes double as the placeholder vocabulary. The
//! vocabulary is closed: the filler only ever expands keys listed in
//! [`CvRecord::placeholder_fields`], and tokens outside it are left verbatim.

use serde::{Deserialize, Serialize};

/// One project entry in the career history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "CLIENT_NOM", default)]
    pub client: Option<String>,
    #[serde(rename = "DATE_DEBUT", default)]
    pub date_start: Option<String>,
    #[serde(rename = "DATE_FIN", default)]
    pub date_end: Option<String>,
    #[serde(rename = "INTITULE_POSTE", default)]
    pub role_title: Option<String>,
    #[serde(rename = "INTITULE_PROJET", default)]
    pub project_title: Option<String>,
    /// Free text (budget, headcount, safety record…). Omitted when empty.
    #[serde(rename = "DETAILS_PROJET", default)]
    pub details: Option<String>,
    #[serde(rename = "REALISATION", default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diploma {
    #[serde(rename = "ANNEE_DIPLOME", default)]
    pub year: Option<String>,
    #[serde(rename = "INTITULE_DIPLOME", default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageSkill {
    #[serde(rename = "LANGUE", default)]
    pub language: Option<String>,
    #[serde(rename = "NIVEAU", default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Training {
    #[serde(rename = "ANNEE_FORMATION", default)]
    pub year: Option<String>,
    #[serde(rename = "INTITULE_FORMATION", default)]
    pub title: Option<String>,
}

/// The structured record produced by extraction and consumed by the filler.
/// Every field defaults, so a partial service response still deserializes;
/// `TRI`, `ANNEE`, `TELEPHONE` and `EMAIL` are filled in locally afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvRecord {
    #[serde(rename = "PRENOM", default)]
    pub first_name: String,
    #[serde(rename = "NOM", default)]
    pub last_name: String,
    #[serde(rename = "INTITULE_DU_POSTE", default)]
    pub job_title: String,
    /// Initials code, derived locally (first-name initial + two consonants).
    #[serde(rename = "TRI", default)]
    pub trigram: String,
    /// Birth year derived from the age found in the CV text.
    #[serde(rename = "ANNEE", default)]
    pub birth_year: String,
    #[serde(rename = "TELEPHONE", default)]
    pub phone: String,
    #[serde(rename = "EMAIL", default)]
    pub email: String,
    #[serde(rename = "EXPERTISE", default)]
    pub expertise: Vec<String>,
    #[serde(rename = "SECTEUR", default)]
    pub sectors: Vec<String>,
    #[serde(rename = "METHODOLOGIE", default)]
    pub methodologies: Vec<String>,
    #[serde(rename = "HABILITATION", default)]
    pub habilitations: Vec<String>,
    #[serde(rename = "Projets effectués", default)]
    pub projects: Vec<Project>,
    #[serde(rename = "Diplômes", default)]
    pub diplomas: Vec<Diploma>,
    #[serde(rename = "Langues", default)]
    pub languages: Vec<LanguageSkill>,
    #[serde(rename = "Formations complémentaires", default)]
    pub trainings: Vec<Training>,
}

/// Literal substituted when the first column of a pair entry is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairFallback {
    /// Year-like column: renders "N/A".
    NotAvailable,
    /// Label-like column: renders the localized "Not specified".
    NotSpecified,
}

/// A field's value tagged with its expansion kind. Resolved once per record
/// by [`CvRecord::placeholder_fields`], not sniffed per paragraph.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Scalar(&'a str),
    StringList(&'a [String]),
    Projects(&'a [Project]),
    Pairs {
        entries: Vec<(Option<&'a str>, Option<&'a str>)>,
        first_fallback: PairFallback,
    },
}

impl CvRecord {
    /// The closed placeholder vocabulary, in dispatch order. The body pass
    /// expands the first key whose token occurs in a paragraph.
    pub fn placeholder_fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("PRENOM", FieldValue::Scalar(&self.first_name)),
            ("NOM", FieldValue::Scalar(&self.last_name)),
            ("INTITULE_DU_POSTE", FieldValue::Scalar(&self.job_title)),
            ("TRI", FieldValue::Scalar(&self.trigram)),
            ("ANNEE", FieldValue::Scalar(&self.birth_year)),
            ("TELEPHONE", FieldValue::Scalar(&self.phone)),
            ("EMAIL", FieldValue::Scalar(&self.email)),
            ("EXPERTISE", FieldValue::StringList(&self.expertise)),
            ("SECTEUR", FieldValue::StringList(&self.sectors)),
            ("METHODOLOGIE", FieldValue::StringList(&self.methodologies)),
            ("HABILITATION", FieldValue::StringList(&self.habilitations)),
            ("Projets effectués", FieldValue::Projects(&self.projects)),
            (
                "Diplômes",
                FieldValue::Pairs {
                    entries: self
                        .diplomas
                        .iter()
                        .map(|d| (d.year.as_deref(), d.title.as_deref()))
                        .collect(),
                    first_fallback: PairFallback::NotAvailable,
                },
            ),
            (
                "Langues",
                FieldValue::Pairs {
                    entries: self
                        .languages
                        .iter()
                        .map(|l| (l.language.as_deref(), l.level.as_deref()))
                        .collect(),
                    first_fallback: PairFallback::NotSpecified,
                },
            ),
            (
                "Formations complémentaires",
                FieldValue::Pairs {
                    entries: self
                        .trainings
                        .iter()
                        .map(|t| (t.year.as_deref(), t.title.as_deref()))
                        .collect(),
                    first_fallback: PairFallback::NotAvailable,
                },
            ),
        ]
    }

    /// Scalar keys only — the subset substituted in headers and footers.
    pub fn scalar_fields(&self) -> Vec<(&'static str, &str)> {
        self.placeholder_fields()
            .into_iter()
            .filter_map(|(key, value)| match value {
                FieldValue::Scalar(s) => Some((key, s)),
                _ => None,
            })
            .collect()
    }
}
