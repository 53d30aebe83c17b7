//! Fuzzy string similarity on a 0–100 scale.
//!
//! `ratio` is the normalized Indel similarity: `100 * (1 - (|a| + |b| - 2·LCS) / (|a| + |b|))`.
//! `partial_ratio` and `token_set_ratio` build on it the same way the common
//! fuzzy-matching libraries do, so thresholds such as "≥ 90" keep their usual meaning.

use std::collections::{BTreeSet, HashMap};

/// Needles up to this many chars use the bit-parallel LCS.
const WORD_BITS: usize = 64;

/// Normalized Indel similarity of two strings (character based).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` between the shorter string and any same-length window of the longer one.
///
/// Windows that overhang either end of the longer string are also considered, so a
/// needle that is only partially present near the edges still scores.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if needle.is_empty() {
        return 0.0;
    }
    if contains_slice(&haystack, &needle) {
        return 100.0;
    }

    let n = needle.len();
    let mask = PatternMask::new(&needle);
    let score = |window: &[char]| -> f64 {
        let lcs = match &mask {
            Some(mask) => mask.lcs_len(window),
            None => lcs_len(&needle, window),
        };
        (200 * lcs) as f64 / (n + window.len()) as f64
    };

    let mut best = 0.0_f64;
    // Edge windows shorter than the needle.
    for len in 1..n.min(haystack.len() + 1) {
        best = best.max(score(&haystack[..len]));
        best = best.max(score(&haystack[haystack.len() - len..]));
    }
    for start in 0..=(haystack.len() - n) {
        best = best.max(score(&haystack[start..start + n]));
        if best >= 100.0 {
            break;
        }
    }

    best
}

/// Set-based token comparison that ignores word order and duplicated words.
///
/// Returns 100 when one token set is a subset of the other (and they share a token).
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let combined_a = join_nonempty(&sect, &only_a.join(" "));
    let combined_b = join_nonempty(&sect, &only_b.join(" "));

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    // 1 - distance/total == 2·LCS/total
    (200 * lcs_len(a, b)) as f64 / total as f64
}

/// Longest common subsequence length.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    match PatternMask::new(short) {
        Some(mask) => mask.lcs_len(long),
        None => lcs_len_dp(short, long),
    }
}

/// Two-row dynamic programming, for patterns too long for one machine word.
fn lcs_len_dp(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Per-char match bitmasks of a pattern of at most `WORD_BITS` chars.
///
/// `lcs_len` runs in O(|text|) with one word of state (Hyyrö's bit-vector LCS).
struct PatternMask {
    len: usize,
    ascii: [u64; 128],
    other: HashMap<char, u64>,
}

impl PatternMask {
    fn new(pattern: &[char]) -> Option<Self> {
        if pattern.len() > WORD_BITS {
            return None;
        }
        let mut mask = Self {
            len: pattern.len(),
            ascii: [0; 128],
            other: HashMap::new(),
        };
        for (i, &c) in pattern.iter().enumerate() {
            let bit = 1u64 << i;
            if c.is_ascii() {
                mask.ascii[c as usize] |= bit;
            } else {
                *mask.other.entry(c).or_default() |= bit;
            }
        }
        Some(mask)
    }

    fn get(&self, c: char) -> u64 {
        if c.is_ascii() {
            self.ascii[c as usize]
        } else {
            self.other.get(&c).copied().unwrap_or(0)
        }
    }

    fn lcs_len(&self, text: &[char]) -> usize {
        let mut v = u64::MAX;
        for &c in text {
            let u = v & self.get(c);
            v = v.wrapping_add(u) | v.wrapping_sub(u);
        }
        let used = if self.len == WORD_BITS {
            u64::MAX
        } else {
            (1u64 << self.len) - 1
        };
        (!v & used).count_ones() as usize
    }
}

fn contains_slice(haystack: &[char], needle: &[char]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}
