//! Fuzzy string matching on a 0-100 scale
//!
//! Scoring is a weighted ratio built on normalized Levenshtein similarity:
//! - Both strings are pre-processed (lowercase, non-alphanumerics → spaces)
//! - Similar lengths (ratio < 1.5): best of plain ratio, token-sort ratio and
//!   token-set ratio (token variants weighted 0.95)
//! - Dissimilar lengths: partial (best aligned window) variants, weighted 0.9
//!   when the length ratio is below 8, 0.6 above
//!
//! `best_match` picks the highest score; on ties the first candidate in
//! iteration order wins.

use std::collections::BTreeSet;

/// Result of a successful match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    /// The candidate exactly as supplied
    pub value: &'a str,
    /// Similarity score (0-100)
    pub score: u8,
}

/// Return the highest-scoring candidate if its score reaches `cutoff`
pub fn best_match<'a, S: AsRef<str>>(
    query: &str,
    candidates: &'a [S],
    cutoff: u8,
) -> Option<FuzzyMatch<'a>> {
    let mut best: Option<FuzzyMatch<'a>> = None;

    for candidate in candidates {
        let value = candidate.as_ref();
        let score = weighted_ratio(query, value);

        if best.map_or(true, |b| score > b.score) {
            best = Some(FuzzyMatch { value, score });
        }
    }

    best.filter(|m| m.score >= cutoff)
}

/// Weighted similarity score between two strings (0-100)
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let p1 = full_process(a);
    let p2 = full_process(b);

    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let len1 = p1.chars().count();
    let len2 = p2.chars().count();
    let len_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;

    let base = ratio(&p1, &p2);

    let best = if len_ratio < 1.5 {
        const TOKEN_SCALE: f64 = 0.95;
        base.max(token_sort_ratio(&p1, &p2, ratio) * TOKEN_SCALE)
            .max(token_set_ratio(&p1, &p2, ratio) * TOKEN_SCALE)
    } else {
        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        let token_scale = 0.95 * partial_scale;
        base.max(partial_ratio(&p1, &p2) * partial_scale)
            .max(token_sort_ratio(&p1, &p2, partial_ratio) * token_scale)
            .max(token_set_ratio(&p1, &p2, partial_ratio) * token_scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace
fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .flat_map(|c| {
            let keep = if c.is_alphanumeric() { c } else { ' ' };
            keep.to_lowercase()
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain similarity, rounded to an integer score
fn ratio(a: &str, b: &str) -> f64 {
    (strsim::normalized_levenshtein(a, b) * 100.0).round()
}

/// Best similarity of the shorter string against every equally long window
/// of the longer one
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if shorter.is_empty() {
        return 0.0;
    }

    let needle: String = shorter.iter().collect();
    let mut best = 0.0_f64;

    for start in 0..=(longer.len() - shorter.len()) {
        let window: String = longer[start..start + shorter.len()].iter().collect();
        let score = strsim::normalized_levenshtein(&needle, &window);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round()
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_tokens<'s, 'x: 's>(tokens: impl Iterator<Item = &'s &'x str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn token_sort_ratio(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    scorer(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compare the shared tokens against each side's full token set
fn token_set_ratio(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join_tokens(tokens_a.intersection(&tokens_b));
    let only_a = join_tokens(tokens_a.difference(&tokens_b));
    let only_b = join_tokens(tokens_b.difference(&tokens_a));

    let combined_a = format!("{} {}", intersection, only_a).trim().to_string();
    let combined_b = format!("{} {}", intersection, only_b).trim().to_string();

    scorer(&intersection, &combined_a)
        .max(scorer(&intersection, &combined_b))
        .max(scorer(&combined_a, &combined_b))
}
