// Shared prompt constants and persona fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Name the assistant speaks as. Every template and instruction uses it.
pub const PERSONA_NAME: &str = "Muthusamy";

/// Role line used in the persona constraints.
pub const PERSONA_ROLE: &str = "Software Engineer";

/// Formatting rules the frontend renderer depends on.
pub const FORMATTING_RULES: &str = "\
IMPORTANT FORMATTING RULES:
1. **Formatting**: Use DOUBLE LINE BREAKS (\"\\n\\n\") between every paragraph. This is critical for the frontend renderer.
2. **Indentation**: Do not add manual spaces at the start of paragraphs. The frontend applies indentation automatically to paragraphs.
3. **No URLs**: **NEVER** output a raw URL, HTTP link, or website address (like https://...). Instead, describe the link (e.g., \"You can view the code on my GitHub\" instead of \"View at github.com/...\").
4. **Headings**: Use \"### Title\" for sections.
5. **Lists**: Use bullet points (* item).";

/// Literal lead-in every spoken introduction must start with.
pub fn intro_lead_in() -> String {
    format!("This is {PERSONA_NAME}")
}
