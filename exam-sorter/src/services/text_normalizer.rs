//! Course name clean-up before fuzzy matching

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Drop everything that is not a word character or whitespace, collapse
/// whitespace runs to single spaces and trim.
pub fn normalize(raw: &str) -> String {
    let stripped = NON_WORD.replace_all(raw, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
