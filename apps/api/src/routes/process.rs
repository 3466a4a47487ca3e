//! POST /api/v1/cv/process — the upload → extract → fill → download pipeline.
//!
//! The uploaded file is copied to a run-scoped temp file (dropped on every
//! exit path), its text extracted and cleaned, the structured record pulled
//! from the extraction service, and the locale's template filled. The
//! response body is the generated `.docx`.

use std::io::Write;

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::docx;
use crate::errors::AppError;
use crate::extract;
use crate::fields;
use crate::locale::Locale;
use crate::state::AppState;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub async fn handle_process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut locale = Locale::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("locale") => {
                let tag = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read locale: {e}")))?;
                locale = Locale::parse(&tag);
            }
            _ => {}
        }
    }

    let (file_name, file_bytes) = require_upload(file_name, file_bytes)?;

    info!(
        "Processing CV '{}' ({} bytes, locale {})",
        file_name,
        file_bytes.len(),
        locale.tag()
    );

    // Run-scoped copy of the upload; removed on drop whatever happens next.
    let extension = file_name.rsplit('.').next().unwrap_or_default();
    let mut upload = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .map_err(|e| AppError::Internal(e.into()))?;
    upload
        .write_all(&file_bytes)
        .map_err(|e| AppError::Internal(e.into()))?;

    let cv_text = extract::extract_text(upload.path())?;
    if cv_text.is_empty() {
        return Err(AppError::Extraction(
            "the document contains no extractable text".to_string(),
        ));
    }

    let record = fields::extract(&state.llm, &cv_text, locale).await?;

    let template = state.config.template_path(locale);
    let output = docx::fill(&template, &record, locale)?;

    let base = file_name.split('.').next().unwrap_or("cv");
    let output_name = format!("{base}_parlym.docx");
    info!("Generated '{}' ({} bytes)", output_name, output.len());

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{output_name}\""),
            ),
        ],
        output,
    )
        .into_response())
}

/// Validates the captured multipart parts. Distinguishes a missing `file`
/// part, a part with no content, and a zero-byte upload.
fn require_upload(
    file_name: Option<String>,
    file_bytes: Option<Vec<u8>>,
) -> Result<(String, Vec<u8>), AppError> {
    let file_name = file_name.ok_or_else(|| {
        AppError::Validation("Missing 'file' field in the multipart body".to_string())
    })?;
    let file_bytes = file_bytes
        .ok_or_else(|| AppError::Validation("No file content received".to_string()))?;
    if file_bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok((file_name, file_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_field_is_rejected() {
        let err = require_upload(None, None).unwrap_err();
        assert_eq!(message(err), "Missing 'file' field in the multipart body");
    }

    #[test]
    fn test_file_field_without_content_is_rejected() {
        let err = require_upload(Some("cv.pdf".to_string()), None).unwrap_err();
        assert_eq!(message(err), "No file content received");
    }

    #[test]
    fn test_zero_byte_upload_is_rejected() {
        let err = require_upload(Some("cv.pdf".to_string()), Some(Vec::new())).unwrap_err();
        assert_eq!(message(err), "Uploaded file is empty");
    }

    #[test]
    fn test_valid_upload_passes_through() {
        let (name, bytes) =
            require_upload(Some("cv.pdf".to_string()), Some(vec![1, 2, 3])).unwrap();
        assert_eq!(name, "cv.pdf");
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
