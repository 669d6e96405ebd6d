//! Answer normalization for comparing a learner's answer with the expected one.
//!
//! Lenient on accents, casing, punctuation and spacing; strict on the letters
//! themselves.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string before comparison.
///
/// Lowercases, expands `ß`, `æ` and `œ`, decomposes to NFD and drops the
/// combining marks, turns hyphens and apostrophes into word breaks, removes
/// other punctuation and collapses whitespace. `"L'Été"` becomes `"l ete"`.
pub fn normalize_for_comparison(s: &str) -> String {
    let expanded = s
        .to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe");

    let stripped: String = expanded
        .nfd()
        .map(|c| if is_word_break(c) { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

const fn is_word_break(c: char) -> bool {
    matches!(c, '-' | '\'' | '\u{2019}')
}

/// Character-level edit distance between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
