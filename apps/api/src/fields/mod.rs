//! Field extraction — turns cleaned CV text into a [`CvRecord`].
//!
//! The heavy lifting is delegated to the extraction service; this module
//! adds the locally derived fields the service is not asked for (initials
//! code, normalized phone, birth year, email), all computed from the source
//! text with plain regexes.

pub mod enrich;

use chrono::{Datelike, Utc};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::locale::Locale;
use crate::models::record::CvRecord;

/// Extracts the structured record for `cv_text` and enriches it locally.
pub async fn extract(
    llm: &LlmClient,
    cv_text: &str,
    locale: Locale,
) -> Result<CvRecord, AppError> {
    let mut record = llm.extract_cv(cv_text, locale).await?;

    record.trigram = enrich::trigram(&record.first_name, &record.last_name);
    record.phone = enrich::find_phone(cv_text).unwrap_or_default();
    record.birth_year = enrich::birth_year(cv_text, Utc::now().year())
        .map(|y| y.to_string())
        .unwrap_or_default();
    if record.email.trim().is_empty() {
        record.email = enrich::find_email(cv_text).unwrap_or_default();
    }

    info!(
        "Extracted CV record: {} {} ({}), {} projects",
        record.first_name,
        record.last_name,
        record.trigram,
        record.projects.len()
    );
    Ok(record)
}
