//! Local Fallback Responder: answers questions from the resume text without a model.
//!
//! Rules are evaluated in a fixed order and the first one that produces an answer
//! wins. A rule may match the question but still decline (the skills rule when no
//! skills section exists), in which case evaluation continues. Generic sentence
//! retrieval runs last.

use std::sync::LazyLock;

use regex::Regex;

use crate::llm_client::prompts::{PERSONA_NAME, PERSONA_ROLE};
use crate::responder::corpus::ResumeCorpus;
use crate::responder::tokenizer::tokenize;

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "greetings", "hola"];
const INTRO_PHRASES: &[&str] = &["intro", "tell me about yourself", "who are you", "summary"];
const CONTACT_WORDS: &[&str] = &["email", "contact", "reach"];
const SKILL_WORDS: &[&str] = &["skill", "stack", "technology"];

/// Maximum number of sentences quoted by generic retrieval.
const MAX_MATCHES: usize = 3;
/// Bonus when the whole token phrase appears contiguously in a sentence.
const PHRASE_BONUS: u32 = 2;
const LINK_PLACEHOLDER: &str = "the provided link";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex")
});
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("url regex"));

/// A resume sentence and its keyword-overlap score for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence<'a> {
    pub sentence: &'a str,
    pub score: u32,
}

struct Rule {
    name: &'static str,
    /// Receives the trimmed, lowercased question.
    applies: fn(&str) -> bool,
    /// Receives the resume text. `None` declines and lets later rules run.
    answer: fn(&str) -> Option<String>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "greeting",
        applies: is_greeting,
        answer: greeting_answer,
    },
    Rule {
        name: "intro",
        applies: is_intro,
        answer: intro_answer,
    },
    Rule {
        name: "contact",
        applies: is_contact,
        answer: contact_answer,
    },
    Rule {
        name: "skills",
        applies: is_skills,
        answer: skills_answer,
    },
];

/// Answers `question` from `resume_context` alone. Pure and deterministic.
pub fn respond(question: &str, resume_context: &str) -> String {
    let lower = question.trim().to_lowercase();

    for rule in RULES {
        if !(rule.applies)(&lower) {
            continue;
        }
        if let Some(answer) = (rule.answer)(resume_context) {
            tracing::debug!(rule = rule.name, "fallback rule matched");
            return answer;
        }
    }

    retrieval_answer(&lower, resume_context)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn is_greeting(lower: &str) -> bool {
    GREETING_WORDS
        .iter()
        .any(|w| lower == *w || lower.starts_with(&format!("{w} ")))
}

fn is_intro(lower: &str) -> bool {
    contains_any(lower, INTRO_PHRASES)
}

fn is_contact(lower: &str) -> bool {
    contains_any(lower, CONTACT_WORDS)
}

fn is_skills(lower: &str) -> bool {
    contains_any(lower, SKILL_WORDS)
}

fn greeting_answer(_resume: &str) -> Option<String> {
    Some(format!(
        "Hello! I am {PERSONA_NAME}'s AI assistant.\n\n\
         I can provide detailed information about his professional background, skills, \
         and projects based on his resume.\n\n\
         What would you like to know?"
    ))
}

fn intro_answer(_resume: &str) -> Option<String> {
    Some(format!(
        "### This is {PERSONA_NAME}\n\n\
         I am a dedicated **{PERSONA_ROLE}** with a strong foundation in Full Stack Development. \
         My expertise spans building dynamic web applications using React and Node.js.\n\n\
         I have a particular passion for integrating AI solutions into modern web interfaces. \
         I have hands-on experience with technologies like Supabase and the Gemini API, and I love \
         solving complex problems through code. My goal is to leverage these skills to create \
         impactful digital solutions."
    ))
}

fn contact_answer(resume: &str) -> Option<String> {
    let answer = match EMAIL.find(resume) {
        Some(email) => format!(
            "You can contact me directly via email at **{}**.\n\n\
             My other contact details are available in the sidebar menu on the left.",
            email.as_str()
        ),
        None => "My contact details are available in the sidebar.".to_string(),
    };
    Some(answer)
}

fn skills_answer(resume: &str) -> Option<String> {
    let body = find_skills_section(resume)?;
    Some(format!(
        "I have developed a diverse technical skillset:\n\n\
         ### Core Competencies\n\n\
         {}\n\n\
         I am always eager to learn and apply new technologies to build efficient solutions.",
        body.replace('\n', ", ").trim()
    ))
}

/// Finds the body of the first "Skills" heading: the text after the heading's
/// separator run (`:`, `-`, whitespace) up to the next blank line, the next line
/// starting with an uppercase letter, or the end of the text.
fn find_skills_section(resume: &str) -> Option<&str> {
    const HEADING: &str = "skills";
    // ASCII lowercasing keeps byte offsets aligned with `resume`.
    let lower = resume.to_ascii_lowercase();

    let mut search_from = 0;
    while let Some(pos) = lower[search_from..].find(HEADING) {
        let heading_end = search_from + pos + HEADING.len();
        search_from = heading_end;

        let rest = &resume[heading_end..];
        let body_start = rest
            .find(|c: char| !(c == ':' || c == '-' || c.is_whitespace()))
            .unwrap_or(rest.len());
        if body_start == 0 {
            continue; // "Skillset" and the like
        }

        let body = &rest[body_start..];
        let body = &body[..section_end(body)];
        if body.trim().is_empty() {
            continue;
        }
        return Some(body);
    }
    None
}

fn section_end(body: &str) -> usize {
    let bytes = body.as_bytes();
    bytes
        .iter()
        .enumerate()
        .position(|(i, b)| {
            *b == b'\n'
                && bytes
                    .get(i + 1)
                    .is_some_and(|next| *next == b'\n' || next.is_ascii_uppercase())
        })
        .unwrap_or(body.len())
}

/// Scores every corpus sentence against the tokens: +1 per token found as a
/// substring, plus `PHRASE_BONUS` when the space-joined tokens appear intact.
/// Sorted by score, descending; ties keep corpus order.
pub fn score_sentences<'a>(
    corpus: &ResumeCorpus<'a>,
    tokens: &[String],
) -> Vec<ScoredSentence<'a>> {
    let phrase = tokens.join(" ");
    let mut scored: Vec<ScoredSentence<'a>> = corpus
        .sentences()
        .iter()
        .map(|sentence| {
            let lower = sentence.to_lowercase();
            let mut score = tokens.iter().filter(|t| lower.contains(t.as_str())).count() as u32;
            if lower.contains(&phrase) {
                score += PHRASE_BONUS;
            }
            ScoredSentence { sentence, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn retrieval_answer(lower_question: &str, resume: &str) -> String {
    let tokens = tokenize(lower_question);
    if tokens.is_empty() {
        return "I'm ready to discuss my professional background in detail.\n\n\
                Please ask me about my:\n\n\
                * Specific Projects\n\
                * Work Experience\n\
                * Technical Skills"
            .to_string();
    }

    let corpus = ResumeCorpus::new(resume);
    let matches: Vec<String> = score_sentences(&corpus, &tokens)
        .into_iter()
        .filter(|s| s.score > 0)
        .take(MAX_MATCHES)
        .map(|s| format!("• {}", URL.replace_all(s.sentence, LINK_PLACEHOLDER)))
        .collect();

    if matches.is_empty() {
        return "I checked my resume but couldn't find a specific answer to that.\n\n\
                However, I can tell you in detail about my **Skills**, **Experience**, \
                or the **Projects** I've worked on.\n\n\
                What would you prefer?"
            .to_string();
    }

    format!(
        "Here is what I found regarding that:\n\n{}",
        matches.join("\n\n")
    )
}
