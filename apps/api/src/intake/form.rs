//! Raw job-profile input and its validation into a `JobContext`.

use crate::errors::AppError;
use crate::intake::choice::resolve_field;
use crate::models::job::JobContext;

pub const MISSING_ROLE_OR_AREA: &str =
    "Por favor, defina pelo menos a Área e o Cargo (use 'Outro' se necessário).";

/// Job-profile fields exactly as submitted, before any validation.
#[derive(Debug, Clone, Default)]
pub struct JobProfileForm {
    pub area: Option<String>,
    pub area_custom: Option<String>,
    pub role: Option<String>,
    pub role_custom: Option<String>,
    pub seniority: Option<String>,
    pub seniority_custom: Option<String>,
    pub hard_skills: Vec<String>,
    pub hard_skills_extra: Option<String>,
    pub soft_skills: Vec<String>,
    pub soft_skills_extra: Option<String>,
    pub extra_notes: Option<String>,
}

impl JobProfileForm {
    /// Resolves every field. Fails when role or area is missing.
    pub fn into_job_context(self) -> Result<JobContext, AppError> {
        let area = resolve_field(self.area.as_deref(), self.area_custom.as_deref());
        let role = resolve_field(self.role.as_deref(), self.role_custom.as_deref());
        let seniority = resolve_field(self.seniority.as_deref(), self.seniority_custom.as_deref());

        if role.is_none() || area.is_none() {
            return Err(AppError::Validation(MISSING_ROLE_OR_AREA.to_string()));
        }

        Ok(JobContext {
            role,
            seniority,
            area,
            required_hard_skills: merge_skills(self.hard_skills, self.hard_skills_extra.as_deref()),
            desired_soft_skills: merge_skills(self.soft_skills, self.soft_skills_extra.as_deref()),
            extra_notes: self.extra_notes.unwrap_or_default(),
        })
    }
}

/// Selected skills first, then comma-separated extras. Blanks are dropped.
pub fn merge_skills(selected: Vec<String>, extra: Option<&str>) -> Vec<String> {
    let mut skills: Vec<String> = selected
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if let Some(extra) = extra {
        skills.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        );
    }
    skills
}
