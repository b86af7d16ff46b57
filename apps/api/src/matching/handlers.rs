use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::documents::{extract_pdf_text, is_pdf_filename};
use crate::errors::AppError;
use crate::models::ranking::{RankingResponse, ResumeDocument};
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

struct UploadedFile {
    filename: String,
    data: Bytes,
}

#[derive(Default)]
struct RankingUpload {
    job_description: String,
    files: Vec<UploadedFile>,
}

/// POST /rank-resumes
/// Multipart form: one `job_description` text field, one or more `resumes` files.
pub async fn handle_rank_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RankingResponse>, AppError> {
    let span = info_span!("rank_resumes", request_id = %Uuid::new_v4());
    rank_upload(state, multipart).instrument(span).await.map(Json)
}

async fn rank_upload(state: AppState, multipart: Multipart) -> Result<RankingResponse, AppError> {
    let upload = read_upload(multipart).await?;
    validate_upload(&upload, state.config.max_resumes)?;
    info!(files = upload.files.len(), "Ranking request received");

    let mut resumes = Vec::with_capacity(upload.files.len());
    for file in upload.files {
        if !is_pdf_filename(&file.filename) {
            warn!(filename = %file.filename, "Skipping non-PDF file");
            continue;
        }
        let text = extract_pdf_text(&file.filename, file.data).await?;
        resumes.push(ResumeDocument::new(file.filename, text));
    }

    let response = state
        .engine
        .rank_resumes(&upload.job_description, &resumes)
        .await?;
    info!(total = response.total_resumes, "Ranking complete");
    Ok(response)
}

async fn read_upload(mut multipart: Multipart) -> Result<RankingUpload, AppError> {
    let mut upload = RankingUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                upload.job_description = field.text().await?;
            }
            Some(RESUMES_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                upload.files.push(UploadedFile { filename, data });
            }
            other => {
                warn!(field = ?other, "Ignoring unexpected multipart field");
            }
        }
    }

    Ok(upload)
}

fn validate_upload(upload: &RankingUpload, max_resumes: usize) -> Result<(), AppError> {
    if upload.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }
    if upload.files.is_empty() {
        return Err(AppError::Validation(
            "At least one resume is required".to_string(),
        ));
    }
    if upload.files.len() > max_resumes {
        return Err(AppError::Validation(format!(
            "Maximum {max_resumes} resumes allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(job_description: &str, files: usize) -> RankingUpload {
        RankingUpload {
            job_description: job_description.to_string(),
            files: (0..files)
                .map(|i| UploadedFile {
                    filename: format!("cv{i}.pdf"),
                    data: Bytes::new(),
                })
                .collect(),
        }
    }

    fn validation_message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_job_description_rejected() {
        assert_eq!(
            validation_message(validate_upload(&upload("   \n", 1), 10)),
            "Job description cannot be empty"
        );
    }

    #[test]
    fn test_job_description_checked_before_files() {
        assert_eq!(
            validation_message(validate_upload(&upload("", 0), 10)),
            "Job description cannot be empty"
        );
    }

    #[test]
    fn test_no_files_rejected() {
        assert_eq!(
            validation_message(validate_upload(&upload("Rust engineer", 0), 10)),
            "At least one resume is required"
        );
    }

    #[test]
    fn test_resume_cap_uses_configured_limit() {
        assert_eq!(
            validation_message(validate_upload(&upload("Rust engineer", 11), 10)),
            "Maximum 10 resumes allowed"
        );
        assert_eq!(
            validation_message(validate_upload(&upload("Rust engineer", 4), 3)),
            "Maximum 3 resumes allowed"
        );
        assert!(validate_upload(&upload("Rust engineer", 10), 10).is_ok());
    }
}
