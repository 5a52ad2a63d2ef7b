// All LLM prompt constants for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Candidate fit prompt template.
/// Replace: {job_context_json}, {resume_text}, {json_only_instruction}
pub const FIT_EVALUATION_PROMPT_TEMPLATE: &str = r#"Você é um Headhunter Sênior e especialista em análise técnica.

Sua missão é calcular o "Fit Score" (0-100) de um candidato baseado em requisitos EXPLÍCITOS.

--- REQUISITOS DA VAGA (INPUT) ---
{job_context_json}

--- CANDIDATO (TEXTO EXTRAÍDO DO PDF) ---
{resume_text}

--- REGRAS DE ANÁLISE ---
1. Hard Skills: Verifique se o candidato possui as tecnologias listadas em 'tech_stack_obrigatoria'.
2. Soft Skills: Procure por EVIDÊNCIAS no texto que sugiram as skills pedidas em 'soft_skills_desejadas' (não apenas a palavra-chave, mas contextos como "liderou equipe", "apresentou resultados", etc).
3. Senioridade: Compare o tempo de experiência e cargos anteriores com a 'senioridade' pedida.

SAÍDA OBRIGATÓRIA (JSON):
{
    "candidato_nome": "Nome extraído",
    "score": 0,
    "hard_skills_identificadas": ["Lista das skills da vaga que o candidato TEM"],
    "soft_skills_identificadas": ["Lista das soft skills da vaga que o candidato DEMONSTRA"],
    "pontos_fortes": ["Breve lista"],
    "pontos_fracos": ["Breve lista (gaps em relação à vaga)"],
    "justificativa_resumida": "Explique o score em 1 frase focado no GAP ou no MATCH."
}

{json_only_instruction}"#;
