//! Question classifiers used before any remote call.

use std::sync::LazyLock;

use regex::Regex;

static STRICT_GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(hi|hello|hey|greetings|hola|good\s*(morning|afternoon|evening))(\s*[!,.]\s*)?$")
        .expect("greeting regex")
});

static COMPLEX_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)analyze|reason|plan|strategy|compare|complex|code|solution|think|explain|how|why|elaborate|tell|about|projects",
    )
    .expect("complexity regex")
});

/// A bare greeting, optionally with simple punctuation or a time of day.
pub fn is_strict_greeting(question: &str) -> bool {
    STRICT_GREETING.is_match(&question.trim().to_lowercase())
}

/// Questions that warrant the slower, reasoning-enabled model.
pub fn is_complex(question: &str) -> bool {
    COMPLEX_QUESTION.is_match(question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_greetings() {
        for q in ["hi", "Hello!", "  hey . ", "Good Morning", "goodevening!", "HOLA,"] {
            assert!(is_strict_greeting(q), "{q}");
        }
    }

    #[test]
    fn test_not_strict_greetings() {
        for q in ["hi there", "hello, what do you do?", "good day", "", "hi!!"] {
            assert!(!is_strict_greeting(q), "{q}");
        }
    }

    #[test]
    fn test_complexity_keywords() {
        assert!(is_complex("Explain your NS2 work"));
        assert!(is_complex("Why Java?"));
        assert!(is_complex("list your PROJECTS"));
        assert!(!is_complex("list your languages"));
        assert!(!is_complex("what is your email"));
    }
}
