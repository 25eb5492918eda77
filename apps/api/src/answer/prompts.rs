use crate::llm_client::prompts::{intro_lead_in, FORMATTING_RULES, PERSONA_NAME, PERSONA_ROLE};

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_CONTEXT_CHARS: usize = 30_000;

/// Reply to a bare greeting. Never goes through the model.
pub fn remote_greeting() -> String {
    format!(
        "Hello! I'm {PERSONA_NAME}'s AI Assistant. I'm here to share details about my \
         projects, skills, and experience. What would you like to know?"
    )
}

/// Returned when the model answers with no text.
pub const EMPTY_RESPONSE: &str = "I'm sorry, I couldn't generate a response.";

/// System instruction for every remote call: persona, formatting, resume context.
pub fn build_system_instruction(resume_context: &str) -> String {
    let lead_in = intro_lead_in();
    format!(
        "You are the AI persona of {PERSONA_NAME}, a {PERSONA_ROLE}.
You are speaking directly to a visitor on your personal portfolio website.
Your knowledge is STRICTLY based on the provided resume context below.

{FORMATTING_RULES}

Content Guidelines:
- **Be Elaborative**: Unless it is a simple greeting, provide detailed, multi-paragraph answers. Explain the 'Why' and 'How', not just the 'What'.
- **Identity**: If asked to \"introduce yourself\" or \"play intro\", START your response with exactly: \"{lead_in}...\". Then provide a narrative story about your background.
- **Professionalism**: Maintain a polished, confident tone suitable for a {PERSONA_ROLE}.

RESUME CONTEXT:
{}
",
        truncate_chars(resume_context, MAX_CONTEXT_CHARS)
    )
}

/// Prompt for the spoken introduction. The answer is routed to speech only.
pub fn intro_prompt() -> String {
    format!(
        "Generate a spoken introduction script. It MUST start with exactly these words: \
         '{}'. Then, continue to describe my role, key skills, and passion for technology \
         based on the resume in a storytelling format. Do NOT mention any URLs or links.",
        intro_lead_in()
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_system_instruction_truncates_resume() {
        let resume = format!("{}TAIL_MARKER", "x".repeat(MAX_CONTEXT_CHARS));
        let instruction = build_system_instruction(&resume);
        assert!(instruction.contains(&"x".repeat(MAX_CONTEXT_CHARS)));
        assert!(!instruction.contains("TAIL_MARKER"));
    }

    #[test]
    fn test_system_instruction_carries_rules() {
        let instruction = build_system_instruction("Email: a@b.io");
        assert!(instruction.contains("NEVER** output a raw URL"));
        assert!(instruction.contains("### Title"));
        assert!(instruction.contains(&format!("\"{}...\"", intro_lead_in())));
        assert!(instruction.ends_with("Email: a@b.io\n"));
    }

    #[test]
    fn test_intro_prompt_demands_lead_in() {
        assert!(intro_prompt().contains(&format!("'{}'", intro_lead_in())));
    }
}
