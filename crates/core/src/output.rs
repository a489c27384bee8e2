//! Tiered comparison of program output against expected output.
//!
//! Exercise outputs are judged leniently: a solution should not fail on
//! trailing newlines or spacing differences that a human reader would not
//! notice. Three equivalence tiers are tried in order, short-circuiting on
//! the first match:
//!
//! 1. exact match after trimming both strings;
//! 2. match after collapsing every internal whitespace run (including
//!    newlines) to a single space;
//! 3. line-wise match with per-line trimming and blank lines dropped.
//!
//! Ordering stays significant in tier 3: `"a\nb"` never matches `"b\na"`.

/// Returns true if `actual` is an acceptable rendering of `expected`.
#[must_use]
pub fn matches(actual: &str, expected: &str) -> bool {
    exact_match(actual, expected)
        || collapsed_match(actual, expected)
        || line_wise_match(actual, expected)
}

fn exact_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapsed_match(actual: &str, expected: &str) -> bool {
    collapse_whitespace(actual) == collapse_whitespace(expected)
}

fn trimmed_lines(s: &str) -> Vec<&str> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn line_wise_match(actual: &str, expected: &str) -> bool {
    let actual_lines = trimmed_lines(actual);
    let expected_lines = trimmed_lines(expected);
    actual_lines.len() == expected_lines.len()
        && actual_lines
            .iter()
            .zip(expected_lines.iter())
            .all(|(a, e)| a == e)
}
