use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        State,
    },
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_text, EXTRACTION_FAILED};
use crate::matching::matcher::{match_resume, suggest_jobs};
use crate::models::job::RankedJob;
use crate::models::match_result::MatchResult;
use crate::state::AppState;

const MISSING_MATCH_FIELDS: &str = "Missing resume file or job description";
const MISSING_RESUME: &str = "Missing resume file";
const NO_FILE_SELECTED: &str = "No resume file selected";

// ────────────────────────────────────────────────────────────────────────────
// Multipart form
// ────────────────────────────────────────────────────────────────────────────

struct UploadedResume {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct ResumeForm {
    resume: Option<UploadedResume>,
    job_description: Option<String>,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status().as_u16() == 413 {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::InvalidInput(e.body_text())
    }
}

/// Reads the `resume` file and the `jobDescription` (or `job_description`)
/// text field. Unknown fields are skipped.
async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ResumeForm, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let mut form = ResumeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.resume = Some(UploadedResume { file_name, bytes });
            }
            "jobDescription" | "job_description" => {
                form.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Runs extraction off the async runtime. A panicking PDF parser is an
/// extraction failure, not a crashed request.
async fn extract_resume_text(resume: UploadedResume) -> Result<String, AppError> {
    if resume.file_name.trim().is_empty() {
        return Err(AppError::InvalidInput(NO_FILE_SELECTED.to_string()));
    }
    tokio::task::spawn_blocking(move || extract_text(&resume.file_name, &resume.bytes))
        .await
        .map_err(|e| {
            warn!("Resume extraction task failed: {e}");
            AppError::ExtractionFailure(EXTRACTION_FAILED.to_string())
        })?
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume-match
pub async fn handle_resume_match(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let form = read_form(multipart).await?;
    let (Some(resume), Some(job_description)) = (form.resume, form.job_description) else {
        return Err(AppError::InvalidInput(MISSING_MATCH_FIELDS.to_string()));
    };

    let resume_text = extract_resume_text(resume).await?;
    let snapshot = state.engine.snapshot();
    let result = match_resume(
        snapshot,
        &state.feedback,
        state.config.scoring_weights,
        &resume_text,
        &job_description,
    )
    .await?;

    info!(
        "Resume match: score={} strengths={} weaknesses={} source={:?}",
        result.score,
        result.strengths.len(),
        result.weaknesses.len(),
        result.source
    );
    Ok(Json(result))
}

/// One entry of the job-suggestion response, keyed like the dataset columns.
#[derive(Debug, Serialize)]
pub struct JobSuggestion {
    #[serde(rename = "Job_Title")]
    pub job_title: String,
    #[serde(rename = "Company_Name")]
    pub company_name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "CTC")]
    pub ctc: String,
    #[serde(rename = "Posted")]
    pub posted: String,
    #[serde(rename = "Match_Score")]
    pub match_score: u32,
}

impl From<RankedJob> for JobSuggestion {
    fn from(ranked: RankedJob) -> Self {
        let posting = ranked.posting;
        Self {
            job_title: posting.title,
            company_name: posting.company,
            location: posting.location,
            experience: posting.experience_range,
            ctc: posting.compensation,
            posted: posting.posted_date,
            match_score: ranked.match_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobSuggestionResponse {
    pub suggestions: Vec<JobSuggestion>,
}

/// POST /api/job-suggestion
pub async fn handle_job_suggestion(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<JobSuggestionResponse>, AppError> {
    let form = read_form(multipart).await?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::InvalidInput(MISSING_RESUME.to_string()))?;
    let resume_text = extract_resume_text(resume).await?;

    let snapshot = state.engine.snapshot();
    let ranker = Arc::clone(&state.ranker);
    let weights = state.config.scoring_weights;
    let ranked = tokio::task::spawn_blocking(move || {
        suggest_jobs(&snapshot, &ranker, &weights, &resume_text)
    })
    .await
    .map_err(|e| anyhow!("Job ranking task failed: {e}"))?;

    info!(
        "Job suggestion: returning {} of top {}",
        ranked.len(),
        state.ranker.top_k()
    );
    Ok(Json(JobSuggestionResponse {
        suggestions: ranked.into_iter().map(JobSuggestion::from).collect(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub postings: usize,
    pub vocabulary_terms: usize,
    pub skills: usize,
}

/// POST /api/admin/reload
/// Rebuilds the engine snapshot from its sources. On failure the active
/// snapshot keeps serving.
pub async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let engine = Arc::clone(&state.engine);
    let sources = state.sources.clone();
    let snapshot = tokio::task::spawn_blocking(move || engine.reload(&sources))
        .await
        .map_err(|e| anyhow!("Reload task failed: {e}"))??;

    info!("Engine snapshot #{} is now active", snapshot.generation());
    Ok(Json(ReloadResponse {
        generation: snapshot.generation(),
        postings: snapshot.postings().len(),
        vocabulary_terms: snapshot.vocabulary().len(),
        skills: snapshot.taxonomy().len(),
    }))
}
