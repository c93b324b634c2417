// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_RULES: &str = "CRITICAL OUTPUT RULES:\n\
    1. Output ONLY valid JSON, a single JSON object.\n\
    2. Do NOT use Markdown code blocks.\n\
    3. Do NOT include any text outside the JSON object.\n\
    4. Use exactly the keys shown below. Every key is required.";
