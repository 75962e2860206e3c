/// Replace every run of whitespace with a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed, non-empty lines of `text`
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split on sentence terminators (`.`, `!`, `?`) and trim each piece.
///
/// Empty pieces are kept so callers can apply their own length filters.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?']).map(str::trim).collect()
}

/// Text before the first sentence terminator
pub fn first_sentence(text: &str) -> &str {
    text.split(['.', '!', '?']).next().unwrap_or_default().trim()
}

/// Case-insensitive check for any of `words` inside `text`
pub fn contains_any(text: &str, words: &[&str]) -> bool {
    let lower = text.to_lowercase();
    words.iter().any(|word| lower.contains(word))
}
