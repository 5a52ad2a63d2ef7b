use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Name values the model echoes back when it could not find one in the resume.
const NAME_PLACEHOLDERS: &[&str] = &["Nome Completo", "Full Name", "Nome extraído"];

/// Structured fit evaluation for one candidate, in the model's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(rename = "candidato_nome", default)]
    pub candidate_name: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(rename = "hard_skills_identificadas", default)]
    pub hard_skills_matched: Vec<String>,
    #[serde(rename = "soft_skills_identificadas", default)]
    pub soft_skills_matched: Vec<String>,
    #[serde(rename = "pontos_fortes", default)]
    pub strengths: Vec<String>,
    #[serde(rename = "pontos_fracos", default)]
    pub gaps: Vec<String>,
    #[serde(rename = "justificativa_resumida", default)]
    pub summary_justification: String,
}

impl EvaluationResult {
    /// Matched skills are sets: drop repeats, keep the model's order.
    pub fn normalize(mut self) -> Self {
        dedup_preserving_order(&mut self.hard_skills_matched);
        dedup_preserving_order(&mut self.soft_skills_matched);
        self
    }

    /// Substitutes `display_name` when the model returned no real name.
    pub fn with_name_fallback(mut self, display_name: &str) -> Self {
        let name = self.candidate_name.trim();
        if name.is_empty() || NAME_PLACEHOLDERS.iter().any(|p| p.eq_ignore_ascii_case(name)) {
            self.candidate_name = display_name.to_string();
        }
        self
    }
}

fn dedup_preserving_order(items: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    items.retain(|item| {
        let key = item.trim().to_lowercase();
        if key.is_empty() || seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });
}

/// Accepts `85`, `85.4` or `"85"` and clamps into 0..=100.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let score = match &raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| serde::de::Error::custom(format!("score is not numeric: {raw}")))?;

    Ok(score.round().clamp(0.0, 100.0) as u8)
}
