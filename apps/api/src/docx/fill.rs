//! Template filling — replaces `{{KEY}}` placeholder paragraphs with
//! extracted CV content.
//!
//! Two-pass sweep over the package:
//! 1. header/footer parts: scalar substring substitution only;
//! 2. body: each placeholder paragraph is dispatched on its field kind and
//!    expanded into a descriptor sequence inserted where the placeholder
//!    stood, the placeholder paragraph itself remaining as a trailing empty
//!    line for list kinds.
//!
//! Non-placeholder paragraphs are re-emitted byte-for-byte. The template on
//! disk is never modified.

use std::path::Path;

use tracing::debug;

use crate::docx::builder::{ParaProps, ParagraphSpec, RIGHT_TAB_POS_TWIPS};
use crate::docx::document::{split_paragraphs, Chunk, Paragraph};
use crate::docx::package::{DocxPackage, DOCUMENT_PART, STYLES_PART};
use crate::docx::styles::StyleCatalog;
use crate::docx::FillError;
use crate::locale::Locale;
use crate::models::record::{CvRecord, FieldValue, PairFallback, Project};

/// Display name of the bold-italic style used for project client/date lines.
pub const BOLD_ITALIC_STYLE: &str = "italique gras";
/// Display name of the bulleted-list style used for achievement lines.
pub const BULLET_STYLE: &str = "Liste à puces1";

/// Resolved style ids for the generated paragraphs.
struct StyleIds {
    bold_italic: String,
    bullet: String,
}

/// Fills the template at `template_path` with `record` and returns the bytes
/// of the generated `.docx`.
pub fn fill(template_path: &Path, record: &CvRecord, locale: Locale) -> Result<Vec<u8>, FillError> {
    let mut pkg = DocxPackage::open(template_path)?;
    fill_package(&mut pkg, record, locale)
}

pub fn fill_package(
    pkg: &mut DocxPackage,
    record: &CvRecord,
    locale: Locale,
) -> Result<Vec<u8>, FillError> {
    let catalog = StyleCatalog::parse(&pkg.part_str(STYLES_PART)?)?;
    let styles = StyleIds {
        bold_italic: catalog.resolve(BOLD_ITALIC_STYLE)?.to_string(),
        bullet: catalog.resolve(BULLET_STYLE)?.to_string(),
    };

    // Pass 1: headers and footers, scalar keys only.
    let scalars = record.scalar_fields();
    for part in pkg.header_footer_parts() {
        let xml = pkg.part_str(&part)?;
        let filled = fill_scalar_paragraphs(&xml, &scalars, locale);
        pkg.set_part(&part, filled.into_bytes());
    }

    // Pass 2: the document body.
    let body = pkg.part_str(DOCUMENT_PART)?;
    let filled = fill_body(&body, record, locale, &styles);
    pkg.set_part(DOCUMENT_PART, filled.into_bytes());

    pkg.save_to_bytes()
}

fn placeholder_token(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

/// Empty scalars render the localized "Not specified" literal.
fn scalar_display<'a>(value: &'a str, locale: Locale) -> &'a str {
    if value.trim().is_empty() {
        locale.not_specified()
    } else {
        value
    }
}

/// Missing or blank optional sub-record fields render `fallback`.
fn display_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

/// Replaces every scalar placeholder occurring in a paragraph, rebuilding the
/// paragraph as a single run that keeps its paragraph properties. Paragraphs
/// without any scalar token pass through untouched.
fn fill_scalar_paragraphs(xml: &str, scalars: &[(&'static str, &str)], locale: Locale) -> String {
    let mut out = String::with_capacity(xml.len());
    for chunk in split_paragraphs(xml) {
        match chunk {
            Chunk::Raw(raw) => out.push_str(&raw),
            Chunk::Para(para) => match replace_scalars(&para, scalars, locale) {
                Some(replaced) => out.push_str(&replaced.to_xml()),
                None => out.push_str(&para.raw),
            },
        }
    }
    out
}

fn replace_scalars(
    para: &Paragraph,
    scalars: &[(&'static str, &str)],
    locale: Locale,
) -> Option<ParagraphSpec> {
    let mut text = para.text.clone();
    let mut touched = false;
    for (key, value) in scalars {
        let token = placeholder_token(key);
        if text.contains(&token) {
            text = text.replace(&token, scalar_display(value, locale));
            touched = true;
        }
    }
    touched.then(|| ParagraphSpec::inherited(text, para.ppr.as_deref()))
}

/// Body pass: dispatches each placeholder paragraph on its field kind.
/// Checks keys in vocabulary order and expands the first whose token occurs
/// (placeholders are one-per-paragraph by template contract).
fn fill_body(xml: &str, record: &CvRecord, locale: Locale, styles: &StyleIds) -> String {
    let fields = record.placeholder_fields();
    let scalars = record.scalar_fields();
    let mut out = String::with_capacity(xml.len());

    for chunk in split_paragraphs(xml) {
        match chunk {
            Chunk::Raw(raw) => out.push_str(&raw),
            Chunk::Para(para) => {
                let hit = fields
                    .iter()
                    .find(|(key, _)| para.text.contains(&placeholder_token(key)));
                match hit {
                    None => out.push_str(&para.raw),
                    Some((key, value)) => {
                        debug!("Expanding placeholder {{{{{key}}}}}");
                        expand_into(&mut out, &para, value, &scalars, locale, styles);
                    }
                }
            }
        }
    }
    out
}

fn expand_into(
    out: &mut String,
    para: &Paragraph,
    value: &FieldValue<'_>,
    scalars: &[(&'static str, &str)],
    locale: Locale,
    styles: &StyleIds,
) {
    let ppr = para.ppr.as_deref();
    let specs: Vec<ParagraphSpec> = match value {
        FieldValue::Scalar(_) => {
            // In-place substitution; covers every scalar token sharing the
            // paragraph (e.g. "{{PRENOM}} {{NOM}}").
            match replace_scalars(para, scalars, locale) {
                Some(spec) => {
                    out.push_str(&spec.to_xml());
                    return;
                }
                None => return,
            }
        }
        FieldValue::StringList(items) => items
            .iter()
            .map(|item| ParagraphSpec::inherited(item.as_str(), ppr))
            .collect(),
        FieldValue::Projects(projects) => expand_projects(projects, locale, styles, ppr),
        FieldValue::Pairs {
            entries,
            first_fallback,
        } => expand_pairs(entries, *first_fallback, locale, ppr),
    };

    for spec in &specs {
        out.push_str(&spec.to_xml());
    }
    // The emptied placeholder paragraph remains as a trailing empty line,
    // keeping its paragraph properties.
    out.push_str(&ParagraphSpec::inherited("", ppr).to_xml());
}

/// Expands the project list: per project a bold-italic client/date header
/// with a right tab stop, the role title, the project title in bold, the
/// optional free-text details, and the achievement bullets under a localized
/// bold heading.
fn expand_projects(
    projects: &[Project],
    locale: Locale,
    styles: &StyleIds,
    ppr: Option<&str>,
) -> Vec<ParagraphSpec> {
    let mut specs = Vec::new();
    for project in projects {
        let client = display_or(project.client.as_deref(), locale.not_specified());
        let start = display_or(project.date_start.as_deref(), locale.not_available());
        let end = display_or(project.date_end.as_deref(), locale.not_available());
        specs.push(ParagraphSpec {
            text: format!("{client}\t{start} - {end}"),
            props: ParaProps::StyleWithRightTab(styles.bold_italic.clone(), RIGHT_TAB_POS_TWIPS),
            bold: false,
        });

        specs.push(ParagraphSpec::inherited(
            display_or(project.role_title.as_deref(), locale.not_specified()),
            ppr,
        ));
        specs.push(ParagraphSpec::blank());

        specs.push(
            ParagraphSpec::inherited(
                display_or(project.project_title.as_deref(), locale.not_specified()),
                ppr,
            )
            .bold(),
        );
        if let Some(details) = project.details.as_deref() {
            let details = details.trim();
            if !details.is_empty() {
                specs.push(ParagraphSpec::inherited(details, ppr));
            }
        }
        specs.push(ParagraphSpec::blank());

        if !project.achievements.is_empty() {
            specs.push(ParagraphSpec::inherited(locale.achievements_heading(), ppr).bold());
            for achievement in &project.achievements {
                let achievement = achievement.trim();
                if !achievement.is_empty() {
                    specs.push(ParagraphSpec {
                        text: achievement.to_string(),
                        props: ParaProps::Style(styles.bullet.clone()),
                        bold: false,
                    });
                }
            }
            specs.push(ParagraphSpec::blank());
        }
    }
    specs
}

/// Expands a two-column pair list: `{first}    {second}` with four literal
/// spaces as the visual column separator.
fn expand_pairs(
    entries: &[(Option<&str>, Option<&str>)],
    first_fallback: PairFallback,
    locale: Locale,
    ppr: Option<&str>,
) -> Vec<ParagraphSpec> {
    let fallback = match first_fallback {
        PairFallback::NotAvailable => locale.not_available(),
        PairFallback::NotSpecified => locale.not_specified(),
    };
    entries
        .iter()
        .map(|(first, second)| {
            ParagraphSpec::inherited(
                format!(
                    "{}    {}",
                    display_or(*first, fallback),
                    display_or(*second, locale.not_specified())
                ),
                ppr,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::document::paragraph_texts;
    use crate::models::record::{Diploma, LanguageSkill, Training};

    const STYLES_XML: &str = "<w:styles>\
        <w:style w:type=\"paragraph\" w:styleId=\"ItaliqueGras\">\
        <w:name w:val=\"italique gras\"/></w:style>\
        <w:style w:type=\"paragraph\" w:styleId=\"ListePuces1\">\
        <w:name w:val=\"Liste à puces1\"/></w:style>\
        </w:styles>";

    fn style_ids() -> StyleIds {
        StyleIds {
            bold_italic: "ItaliqueGras".to_string(),
            bullet: "ListePuces1".to_string(),
        }
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    fn styled_para(style: &str, text: &str) -> String {
        format!(
            "<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr>\
             <w:r><w:t>{text}</w:t></w:r></w:p>"
        )
    }

    fn body(paras: &[String]) -> String {
        format!(
            "<w:document><w:body>{}<w:sectPr/></w:body></w:document>",
            paras.concat()
        )
    }

    fn sample_record() -> CvRecord {
        CvRecord {
            first_name: "Cédric".into(),
            last_name: "Gobert".into(),
            job_title: "Chef de projet".into(),
            trigram: "CGB".into(),
            expertise: vec!["Planification".into(), "Leadership".into()],
            projects: vec![
                Project {
                    client: Some("TotalEnergies".into()),
                    date_start: Some("2021".into()),
                    date_end: Some("2023".into()),
                    role_title: Some("Superviseur travaux".into()),
                    project_title: Some("Arrêt technique".into()),
                    details: Some("Budget 2M€, 40 personnes".into()),
                    achievements: vec!["Planning général".into(), "Coordination HSE".into()],
                },
                Project {
                    client: Some("Engie".into()),
                    date_start: None,
                    date_end: Some("2020".into()),
                    role_title: None,
                    project_title: Some("Maintenance".into()),
                    details: Some("   ".into()),
                    achievements: vec![],
                },
            ],
            diplomas: vec![Diploma {
                year: Some("2010".into()),
                title: Some("Master Génie Civil".into()),
            }],
            languages: vec![LanguageSkill {
                language: Some("Anglais".into()),
                level: None,
            }],
            trainings: vec![Training {
                year: None,
                title: Some("Habilitation GIES 2".into()),
            }],
            ..Default::default()
        }
    }

    // ── scalar substitution ─────────────────────────────────────────────────

    #[test]
    fn test_scalar_replaced_in_place() {
        let xml = body(&[para("Poste : {{INTITULE_DU_POSTE}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(paragraph_texts(&out), vec!["Poste : Chef de projet"]);
    }

    #[test]
    fn test_two_scalars_in_one_paragraph_both_replaced() {
        let xml = body(&[para("{{PRENOM}} {{NOM}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(paragraph_texts(&out), vec!["Cédric Gobert"]);
    }

    #[test]
    fn test_empty_scalar_renders_localized_literal() {
        let xml = body(&[para("Tél : {{TELEPHONE}}")]);
        let fr = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(paragraph_texts(&fr), vec!["Tél : Non spécifié"]);
        let en = fill_body(&xml, &sample_record(), Locale::En, &style_ids());
        assert_eq!(paragraph_texts(&en), vec!["Tél : Not specified"]);
    }

    #[test]
    fn test_scalar_with_tab_stop_props_keeps_text_clean() {
        // A tab-stop definition in the placeholder's pPr must not surface as
        // a tab character in the rebuilt paragraph.
        let xml = body(&[format!(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"708\"/></w:tabs></w:pPr>\
             <w:r><w:t>Poste : {{{{INTITULE_DU_POSTE}}}}</w:t></w:r></w:p>"
        )]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(paragraph_texts(&out), vec!["Poste : Chef de projet"]);
    }

    #[test]
    fn test_unrecognized_token_left_verbatim() {
        let xml = body(&[para("{{MATRICULE}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(paragraph_texts(&out), vec!["{{MATRICULE}}"]);
    }

    #[test]
    fn test_untouched_paragraphs_pass_through_byte_for_byte() {
        let untouched = styled_para("Titre1", "EXPÉRIENCE PROFESSIONNELLE");
        let xml = body(&[untouched.clone(), para("{{PRENOM}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert!(out.contains(&untouched));
        assert!(out.contains("<w:sectPr/>"));
    }

    // ── string lists ────────────────────────────────────────────────────────

    #[test]
    fn test_string_list_expands_with_placeholder_style() {
        let xml = body(&[styled_para("Corps", "{{EXPERTISE}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        // Two items plus the emptied placeholder paragraph, all styled "Corps".
        assert_eq!(
            paragraph_texts(&out),
            vec!["Planification", "Leadership", ""]
        );
        assert_eq!(out.matches("<w:pStyle w:val=\"Corps\"/>").count(), 3);
    }

    #[test]
    fn test_empty_string_list_leaves_only_empty_paragraph() {
        let xml = body(&[styled_para("Corps", "{{SECTEUR}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(paragraph_texts(&out), vec![""]);
    }

    // ── project list ────────────────────────────────────────────────────────

    #[test]
    fn test_projects_emit_one_header_per_project_in_order() {
        let xml = body(&[styled_para("Corps", "{{Projets effectués}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        let texts = paragraph_texts(&out);
        let headers: Vec<&String> = texts.iter().filter(|t| t.contains('\t')).collect();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0], "TotalEnergies\t2021 - 2023");
        assert_eq!(headers[1], "Engie\tN/A - 2020");
        assert_eq!(out.matches("<w:pStyle w:val=\"ItaliqueGras\"/>").count(), 2);
        assert_eq!(out.matches("<w:tab w:val=\"right\" w:pos=\"9360\"/>").count(), 2);
    }

    #[test]
    fn test_project_missing_display_fields_render_literals() {
        let xml = body(&[styled_para("Corps", "{{Projets effectués}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        let texts = paragraph_texts(&out);
        // Second project has no role title.
        assert!(texts.iter().any(|t| t == "Non spécifié"));
    }

    #[test]
    fn test_blank_details_paragraph_is_omitted() {
        let xml = body(&[styled_para("Corps", "{{Projets effectués}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        let texts = paragraph_texts(&out);
        assert!(texts.iter().any(|t| t == "Budget 2M€, 40 personnes"));
        // The second project's details are whitespace only and emit nothing.
        assert!(!texts.iter().any(|t| t.trim().is_empty() && !t.is_empty()));
    }

    #[test]
    fn test_empty_achievements_emit_no_heading() {
        let xml = body(&[styled_para("Corps", "{{Projets effectués}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        // Only the first project has achievements → exactly one heading.
        assert_eq!(out.matches("Réalisations :").count(), 1);
        assert_eq!(out.matches("<w:pStyle w:val=\"ListePuces1\"/>").count(), 2);
    }

    #[test]
    fn test_achievements_heading_is_localized() {
        let xml = body(&[styled_para("Corps", "{{Projets effectués}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::En, &style_ids());
        assert!(out.contains("Achievements :"));
        assert!(!out.contains("Réalisations :"));
    }

    #[test]
    fn test_project_title_run_is_bold() {
        let xml = body(&[styled_para("Corps", "{{Projets effectués}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert!(out.contains(
            "<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">Arrêt technique</w:t></w:r>"
        ));
    }

    // ── pair lists ──────────────────────────────────────────────────────────

    #[test]
    fn test_pairs_use_four_space_separator() {
        let xml = body(&[styled_para("Corps", "{{Diplômes}}")]);
        let out = fill_body(&xml, &sample_record(), Locale::Fr, &style_ids());
        assert_eq!(
            paragraph_texts(&out),
            vec!["2010    Master Génie Civil", ""]
        );
    }

    #[test]
    fn test_pair_fallbacks_by_column_kind() {
        let record = sample_record();
        let xml = body(&[
            styled_para("Corps", "{{Langues}}"),
            styled_para("Corps", "{{Formations complémentaires}}"),
        ]);
        let out = fill_body(&xml, &record, Locale::Fr, &style_ids());
        let texts = paragraph_texts(&out);
        // Language level missing → label fallback; training year missing → N/A.
        assert!(texts.iter().any(|t| t == "Anglais    Non spécifié"));
        assert!(texts.iter().any(|t| t == "N/A    Habilitation GIES 2"));
    }

    // ── determinism ─────────────────────────────────────────────────────────

    #[test]
    fn test_fill_is_deterministic() {
        let xml = body(&[
            para("{{PRENOM}} {{NOM}}"),
            styled_para("Corps", "{{Projets effectués}}"),
            styled_para("Corps", "{{Diplômes}}"),
        ]);
        let record = sample_record();
        let first = fill_body(&xml, &record, Locale::Fr, &style_ids());
        let second = fill_body(&xml, &record, Locale::Fr, &style_ids());
        assert_eq!(first, second);
        assert_eq!(paragraph_texts(&first), paragraph_texts(&second));
    }

    // ── header/footer pass ──────────────────────────────────────────────────

    #[test]
    fn test_header_pass_replaces_scalars_only() {
        let record = sample_record();
        let xml = format!(
            "<w:hdr>{}{}</w:hdr>",
            para("{{TRI}} — {{INTITULE_DU_POSTE}}"),
            para("{{EXPERTISE}}")
        );
        let out = fill_scalar_paragraphs(&xml, &record.scalar_fields(), Locale::Fr);
        let texts = paragraph_texts(&out);
        assert_eq!(texts[0], "CGB — Chef de projet");
        // List placeholders are not expanded in headers.
        assert_eq!(texts[1], "{{EXPERTISE}}");
    }

    // ── package-level fill ──────────────────────────────────────────────────

    fn template_package(document_xml: &str) -> DocxPackage {
        let mut pkg = DocxPackage::from_bytes(&empty_zip()).unwrap();
        pkg.set_part("[Content_Types].xml", b"<Types/>".to_vec());
        pkg.set_part(STYLES_PART, STYLES_XML.as_bytes().to_vec());
        pkg.set_part(
            "word/header1.xml",
            format!("<w:hdr>{}</w:hdr>", para("{{PRENOM}} {{NOM}}")).into_bytes(),
        );
        pkg.set_part(DOCUMENT_PART, document_xml.as_bytes().to_vec());
        pkg
    }

    fn empty_zip() -> Vec<u8> {
        use std::io::Cursor;
        use zip::write::SimpleFileOptions;
        use zip::ZipWriter;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        // The archive needs at least one entry to be readable.
        writer
            .start_file("placeholder.txt", SimpleFileOptions::default())
            .unwrap();
        std::io::Write::write_all(&mut writer, b"x").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_fill_package_end_to_end() {
        let xml = body(&[para("{{PRENOM}}"), styled_para("Corps", "{{Diplômes}}")]);
        let mut pkg = template_package(&xml);
        let bytes = fill_package(&mut pkg, &sample_record(), Locale::Fr).unwrap();

        let out = DocxPackage::from_bytes(&bytes).unwrap();
        let doc = out.part_str(DOCUMENT_PART).unwrap();
        assert_eq!(
            paragraph_texts(&doc),
            vec!["Cédric", "2010    Master Génie Civil", ""]
        );
        let header = out.part_str("word/header1.xml").unwrap();
        assert_eq!(paragraph_texts(&header), vec!["Cédric Gobert"]);
    }

    #[test]
    fn test_missing_style_aborts_fill() {
        let mut pkg = template_package(&body(&[para("{{PRENOM}}")]));
        pkg.set_part(STYLES_PART, b"<w:styles/>".to_vec());
        let err = fill_package(&mut pkg, &sample_record(), Locale::Fr).unwrap_err();
        assert!(matches!(err, FillError::StyleNotFound(_)));
    }
}
