//! Resume corpus: the resume text segmented into searchable sentences.

use std::sync::LazyLock;

use regex::Regex;

/// Segments shorter than this (in characters) are headers or fragments.
const MIN_SENTENCE_CHARS: usize = 16;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r\n|\r|\n|\. )+").expect("sentence break regex"));

/// Borrowed view over a resume, split into candidate sentences in corpus order.
#[derive(Debug, Clone)]
pub struct ResumeCorpus<'a> {
    sentences: Vec<&'a str>,
}

impl<'a> ResumeCorpus<'a> {
    pub fn new(text: &'a str) -> Self {
        let sentences = SENTENCE_BREAK
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
            .collect();
        Self { sentences }
    }

    pub fn sentences(&self) -> &[&'a str] {
        &self.sentences
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_newlines_and_sentence_ends() {
        let corpus = ResumeCorpus::new(
            "Built a restaurant recommendation engine. Led the IoT campus project\nDesigned dataset pipelines for Kaggle",
        );
        assert_eq!(
            corpus.sentences(),
            &[
                "Built a restaurant recommendation engine",
                "Led the IoT campus project",
                "Designed dataset pipelines for Kaggle",
            ]
        );
    }

    #[test]
    fn test_drops_short_fragments_and_headers() {
        let corpus = ResumeCorpus::new("SKILLS:\n- Java, C\n\nWorked on traffic simulation in NS2");
        assert_eq!(corpus.sentences(), &["Worked on traffic simulation in NS2"]);
    }

    #[test]
    fn test_sixteen_chars_is_kept_fifteen_dropped() {
        let corpus = ResumeCorpus::new("exactly fifteen\nexactly sixteen!");
        assert_eq!(corpus.sentences(), &["exactly sixteen!"]);
    }

    #[test]
    fn test_crlf_and_trimming() {
        let corpus = ResumeCorpus::new("   Mentored peers during contests   \r\n\r\n");
        assert_eq!(corpus.sentences(), &["Mentored peers during contests"]);
    }

    #[test]
    fn test_empty_text_has_no_sentences() {
        assert!(ResumeCorpus::new("").is_empty());
    }
}
