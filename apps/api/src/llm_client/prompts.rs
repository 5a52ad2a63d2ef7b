// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every prompt that expects a structured reply.
pub const JSON_ONLY_INSTRUCTION: &str = "Responda APENAS com um objeto JSON válido. \
    Não inclua texto fora do objeto JSON. \
    Não use blocos de código markdown. \
    Não inclua explicações ou desculpas.";
