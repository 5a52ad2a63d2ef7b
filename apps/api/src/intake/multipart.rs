//! Reads the multipart analysis submission shared by the HTML and JSON routes.

use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::intake::form::JobProfileForm;
use crate::models::job::{ApiKey, CandidateDocument, JobContext};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Everything the user submitted, unvalidated.
#[derive(Debug, Default)]
pub struct AnalysisSubmission {
    pub api_key: Option<String>,
    pub profile: JobProfileForm,
    pub documents: Vec<CandidateDocument>,
}

/// A submission that passed the pre-flight checks and may start processing.
#[derive(Debug)]
pub struct ValidatedRun {
    pub api_key: ApiKey,
    pub job: JobContext,
    pub documents: Vec<CandidateDocument>,
}

impl AnalysisSubmission {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "resumes" {
                let file_name = field.file_name().map(str::to_string).unwrap_or_default();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                // Browsers send an empty part when no file was picked.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                ensure_pdf(&file_name, content_type.as_deref())?;

                let display_name = if file_name.is_empty() {
                    format!("curriculo-{}.pdf", submission.documents.len() + 1)
                } else {
                    file_name
                };
                debug!("Received document {display_name} ({} bytes)", bytes.len());
                submission
                    .documents
                    .push(CandidateDocument::new(display_name, bytes));
            } else {
                let value = field.text().await?;
                submission.set_text_field(&name, value);
            }
        }

        Ok(submission)
    }

    /// Routes a text field to its slot. Unknown names are ignored.
    pub fn set_text_field(&mut self, name: &str, value: String) {
        let profile = &mut self.profile;
        match name {
            "api_key" => self.api_key = Some(value),
            "area" => profile.area = Some(value),
            "area_custom" => profile.area_custom = Some(value),
            "role" => profile.role = Some(value),
            "role_custom" => profile.role_custom = Some(value),
            "seniority" => profile.seniority = Some(value),
            "seniority_custom" => profile.seniority_custom = Some(value),
            "hard_skills" => profile.hard_skills.push(value),
            "hard_skills_extra" => profile.hard_skills_extra = Some(value),
            "soft_skills" => profile.soft_skills.push(value),
            "soft_skills_extra" => profile.soft_skills_extra = Some(value),
            "extra_notes" => profile.extra_notes = Some(value),
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    /// Pre-flight checks: API key first, then the required job fields.
    pub fn validate(self) -> Result<ValidatedRun, AppError> {
        let api_key = ApiKey::parse(self.api_key.as_deref()).ok_or(AppError::MissingApiKey)?;
        let job = self.profile.into_job_context()?;

        Ok(ValidatedRun {
            api_key,
            job,
            documents: self.documents,
        })
    }
}

fn ensure_pdf(file_name: &str, content_type: Option<&str>) -> Result<(), AppError> {
    let by_extension = file_name.to_lowercase().ends_with(".pdf");
    let by_content_type = content_type == Some(PDF_CONTENT_TYPE);
    if by_extension || by_content_type {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "'{file_name}' não é um PDF. Envie apenas currículos em PDF."
        )))
    }
}
