//! Query tokenizer: turns a free-text question into search tokens.

/// Question words that carry no retrieval signal.
const STOPWORDS: &[&str] = &[
    "what", "where", "when", "how", "who", "does", "this", "have", "with", "show", "give", "can",
    "you",
];

/// Tokens of this many characters or fewer are dropped.
const MAX_DROPPED_LEN: usize = 2;

/// Lowercases, strips non-word characters, and drops short tokens and stopwords.
///
/// Tokens are unique and keep the order of first appearance. An empty result
/// means the question carried no signal; that is not an error.
pub fn tokenize(question: &str) -> Vec<String> {
    let cleaned: String = question
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut tokens: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() <= MAX_DROPPED_LEN || STOPWORDS.contains(&word) {
            continue;
        }
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens
}
