//! Fit Evaluation: pluggable, trait-based evaluator that scores one resume
//! against a job profile.
//!
//! Default: `LlmCandidateEvaluator` (Gemini, deterministic decoding).
//!
//! `AppState` holds an `Arc<dyn CandidateEvaluator>`. Failures are returned as
//! `EvaluationError`, never disguised as a low score; the pipeline decides how
//! a failed candidate shows up in the report.

pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::evaluation::prompts::FIT_EVALUATION_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::evaluation::EvaluationResult;
use crate::models::job::{ApiKey, JobContext};

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Erro API: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to serialize job context: {0}")]
    JobContext(#[source] serde_json::Error),
}

/// The evaluator trait. Implement this to swap backends without touching
/// the pipeline, handlers, or report code.
#[async_trait]
pub trait CandidateEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        api_key: &ApiKey,
        resume_text: &str,
        job: &JobContext,
    ) -> Result<EvaluationResult, EvaluationError>;
}

/// Semantic evaluator via Gemini. One call per candidate, no retries.
pub struct LlmCandidateEvaluator {
    llm: LlmClient,
}

impl LlmCandidateEvaluator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CandidateEvaluator for LlmCandidateEvaluator {
    async fn evaluate(
        &self,
        api_key: &ApiKey,
        resume_text: &str,
        job: &JobContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        let prompt = build_evaluation_prompt(resume_text, job)?;
        debug!("Evaluation prompt built ({} chars)", prompt.len());

        let result: EvaluationResult = self.llm.call_json(api_key, &prompt).await?;
        Ok(result.normalize())
    }
}

/// Fills the evaluation template with the serialized job and the resume text.
pub fn build_evaluation_prompt(
    resume_text: &str,
    job: &JobContext,
) -> Result<String, EvaluationError> {
    let job_context_json = job.to_prompt_json().map_err(EvaluationError::JobContext)?;

    Ok(fill_slots(
        FIT_EVALUATION_PROMPT_TEMPLATE,
        &[
            ("{job_context_json}", &job_context_json),
            ("{json_only_instruction}", JSON_ONLY_INSTRUCTION),
            ("{resume_text}", resume_text),
        ],
    ))
}

/// Single left-to-right pass over the template: substituted values are never
/// scanned again, so placeholders inside user text stay literal.
fn fill_slots(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match slots.iter().find(|(slot, _)| tail.starts_with(slot)) {
            Some((slot, value)) => {
                out.push_str(value);
                rest = &tail[slot.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RESUME: &str = "Carlos Lima\n5 anos como desenvolvedor Python, liderei squad de 4 pessoas.\nSQL avançado.";

    fn backend_job() -> JobContext {
        JobContext {
            role: Some("Backend Developer".to_string()),
            seniority: Some("Pleno".to_string()),
            area: Some("Engenharia de Software".to_string()),
            required_hard_skills: vec!["Python".to_string(), "SQL".to_string()],
            desired_soft_skills: vec!["Trabalho em Equipe".to_string()],
            extra_notes: String::new(),
        }
    }

    fn canned_reply() -> serde_json::Value {
        json!({
            "candidato_nome": "Carlos Lima",
            "score": 84,
            "hard_skills_identificadas": ["Python", "SQL"],
            "soft_skills_identificadas": ["Trabalho em Equipe"],
            "pontos_fortes": ["Liderou squad de 4 pessoas"],
            "pontos_fracos": ["Sem experiência com cloud"],
            "justificativa_resumida": "Match forte nas skills obrigatórias."
        })
    }

    fn gemini_body(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] }, "finishReason": "STOP" }]
        })
        .to_string()
    }

    async fn evaluator_with_reply(
        server: &mut mockito::ServerGuard,
        reply_text: &str,
    ) -> (LlmCandidateEvaluator, mockito::Mock) {
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(gemini_body(reply_text))
            .create_async()
            .await;
        let evaluator = LlmCandidateEvaluator::new(LlmClient::new(server.url()).unwrap());
        (evaluator, mock)
    }

    fn key() -> ApiKey {
        ApiKey::parse(Some("k")).unwrap()
    }

    #[test]
    fn test_prompt_contains_job_resume_rules_and_schema() {
        let prompt = build_evaluation_prompt(RESUME, &backend_job()).unwrap();
        assert!(prompt.contains("\"tech_stack_obrigatoria\""));
        assert!(prompt.contains("Backend Developer"));
        assert!(prompt.contains("liderei squad de 4 pessoas"));
        assert!(prompt.contains("EVIDÊNCIAS"));
        assert!(prompt.contains("'senioridade'"));
        for key in [
            "candidato_nome",
            "score",
            "hard_skills_identificadas",
            "soft_skills_identificadas",
            "pontos_fortes",
            "pontos_fracos",
            "justificativa_resumida",
        ] {
            assert!(prompt.contains(key), "schema key {key} missing");
        }
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_context_json}"));
    }

    #[test]
    fn test_resume_text_cannot_inject_template_slots() {
        let prompt = build_evaluation_prompt("{job_context_json}", &backend_job()).unwrap();
        assert!(prompt.contains("{job_context_json}"));
    }

    #[test]
    fn test_job_notes_cannot_pull_resume_into_requirements() {
        let job = JobContext {
            extra_notes: "ver {resume_text} e {json_only_instruction}".to_string(),
            ..backend_job()
        };
        let prompt = build_evaluation_prompt("SECRET_RESUME_BODY", &job).unwrap();

        assert_eq!(prompt.matches("SECRET_RESUME_BODY").count(), 1);
        assert!(prompt.contains("ver {resume_text} e {json_only_instruction}"));
        assert!(prompt.contains(&job.to_prompt_json().unwrap()));
    }

    #[test]
    fn test_fill_slots_keeps_unknown_braces() {
        let filled = fill_slots("{\"a\": {x}} {y", &[("{x}", "1")]);
        assert_eq!(filled, "{\"a\": 1} {y");
    }

    #[tokio::test]
    async fn test_backend_example_scores_python_match() {
        let mut server = mockito::Server::new_async().await;
        let (evaluator, mock) = evaluator_with_reply(&mut server, &canned_reply().to_string()).await;

        let result = evaluator.evaluate(&key(), RESUME, &backend_job()).await.unwrap();

        assert!(result.hard_skills_matched.iter().any(|s| s == "Python"));
        assert!(result.score > 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fenced_reply_matches_unfenced() {
        let plain = canned_reply().to_string();
        let fenced = format!("```json\n{plain}\n```");

        let mut server = mockito::Server::new_async().await;
        let (plain_eval, _m1) = evaluator_with_reply(&mut server, &plain).await;
        let from_plain = plain_eval.evaluate(&key(), RESUME, &backend_job()).await.unwrap();

        let mut server = mockito::Server::new_async().await;
        let (fenced_eval, _m2) = evaluator_with_reply(&mut server, &fenced).await;
        let from_fenced = fenced_eval.evaluate(&key(), RESUME, &backend_job()).await.unwrap();

        assert_eq!(from_plain, from_fenced);
    }

    #[tokio::test]
    async fn test_repeated_evaluation_with_fixed_reply_is_identical() {
        let mut server = mockito::Server::new_async().await;
        let (evaluator, _mock) = evaluator_with_reply(&mut server, &canned_reply().to_string()).await;

        let first = evaluator.evaluate(&key(), RESUME, &backend_job()).await.unwrap();
        let second = evaluator.evaluate(&key(), RESUME, &backend_job()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_an_error_not_a_zero_score() {
        let mut server = mockito::Server::new_async().await;
        let (evaluator, _mock) = evaluator_with_reply(&mut server, "Desculpe, não consigo.").await;

        let err = evaluator
            .evaluate(&key(), RESUME, &backend_job())
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Llm(LlmError::Parse(_))));
        assert!(err.to_string().starts_with("Erro API:"));
    }
}
