//! Fixed keyword rules, the classifier of last resort.
//!
//! Word lists are deliberately small and high-precision: a rules hit should
//! mean something. Strong-tone lists (anger, appreciation) outrank the
//! plain polarity lists; opposing polarity hits produce `Mixed`.

use flash_core::Sentiment;

const POSITIVE: &[&str] = &[
    "great",
    "good",
    "excellent",
    "amazing",
    "love",
    "best",
    "win",
    "wins",
    "success",
    "successful",
    "growth",
    "record",
    "strong",
    "innovative",
    "award",
    "praised",
    "impressive",
    "soars",
    "beats",
];

const NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "worst",
    "fail",
    "fails",
    "failure",
    "problem",
    "concern",
    "warning",
    "lawsuit",
    "recall",
    "decline",
    "drop",
    "drops",
    "loss",
    "scandal",
    "crisis",
    "layoffs",
    "breach",
    "misses",
];

const ANGER: &[&str] = &[
    "furious",
    "outrage",
    "outraged",
    "angry",
    "anger",
    "boycott",
    "slams",
    "blasts",
    "fury",
    "backlash",
    "disgusted",
    "unacceptable",
];

const APPRECIATION: &[&str] = &[
    "thank",
    "thanks",
    "grateful",
    "appreciate",
    "appreciation",
    "congrats",
    "congratulations",
    "kudos",
    "applauds",
    "proud",
    "honored",
];

/// Classify a text by keyword matching alone.
#[must_use]
pub fn classify(text: &str) -> Sentiment {
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut anger = 0usize;
    let mut appreciation = 0usize;

    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if w.is_empty() {
            continue;
        }
        if ANGER.contains(&w.as_str()) {
            anger += 1;
        } else if APPRECIATION.contains(&w.as_str()) {
            appreciation += 1;
        } else if POSITIVE.contains(&w.as_str()) {
            positive += 1;
        } else if NEGATIVE.contains(&w.as_str()) {
            negative += 1;
        }
    }

    if anger > 0 || appreciation > 0 {
        return match anger.cmp(&appreciation) {
            std::cmp::Ordering::Greater => Sentiment::Anger,
            std::cmp::Ordering::Less => Sentiment::Appreciation,
            std::cmp::Ordering::Equal => Sentiment::Mixed,
        };
    }
    if positive > 0 && negative > 0 {
        Sentiment::Mixed
    } else if positive > 0 {
        Sentiment::Positive
    } else if negative > 0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
