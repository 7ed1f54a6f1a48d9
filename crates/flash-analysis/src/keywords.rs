//! Frequency-based keyword and phrase extraction.

use std::collections::HashMap;

/// English stopwords plus the web/social junk that dominates mention text.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "been", "were", "they", "their", "them", "then", "than",
    "this", "that", "these", "those", "with", "will", "would", "could", "should", "from", "into",
    "over", "under", "about", "after", "before", "between", "while", "where", "when", "what",
    "which", "who", "whom", "why", "how", "its", "his", "she", "him", "hers", "your", "yours",
    "just", "also", "more", "most", "some", "such", "only", "other", "very", "here", "there",
    "each", "few", "both", "own", "same", "too", "again", "once", "during", "off", "down",
    "new", "said", "says", "per", "via", "amp", "com", "www", "http", "https", "co", "uk", "rt",
];

/// Extract the top `top_n` single keywords and two-word phrases by
/// frequency.
///
/// The text is punctuation-stripped and lowercased, then tokens are kept
/// only when longer than two characters, fully alphabetic, and not a
/// stopword. Adjacent-token bigrams are counted over the filtered
/// sequence and kept only above frequency 1, then merged with the unigram
/// counts. Ties break alphabetically so the output is stable.
#[must_use]
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<(String, usize)> {
    let cleaned = flash_core::clean_text(text).to_lowercase();
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|w| {
            w.len() > 2 && w.chars().all(char::is_alphabetic) && !STOPWORDS.contains(w)
        })
        .collect();

    let mut combined: HashMap<String, usize> = HashMap::new();
    for token in &tokens {
        *combined.entry((*token).to_string()).or_default() += 1;
    }

    let mut bigrams: HashMap<String, usize> = HashMap::new();
    for pair in tokens.windows(2) {
        *bigrams.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }
    for (phrase, freq) in bigrams {
        if freq > 1 {
            *combined.entry(phrase).or_default() += freq;
        }
    }

    let mut entries: Vec<(String, usize)> = combined.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(top_n);
    entries
}
