use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The job profile a run scores candidates against.
///
/// Serialized field names are the keys the evaluation prompt refers to, so
/// renaming them changes what the model is told to look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    #[serde(rename = "cargo")]
    pub role: Option<String>,
    #[serde(rename = "senioridade")]
    pub seniority: Option<String>,
    pub area: Option<String>,
    #[serde(rename = "tech_stack_obrigatoria")]
    pub required_hard_skills: Vec<String>,
    #[serde(rename = "soft_skills_desejadas")]
    pub desired_soft_skills: Vec<String>,
    #[serde(rename = "detalhes_extras")]
    pub extra_notes: String,
}

impl JobContext {
    /// Deterministic, human-readable form embedded in the prompt.
    pub fn to_prompt_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One uploaded resume. Lives only for the duration of a run.
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    /// Display name, usually the uploaded file name.
    pub name: String,
    pub bytes: Bytes,
}

impl CandidateDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Model service credential. Never logged, never persisted.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for a missing or blank key.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let key = raw?.trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
