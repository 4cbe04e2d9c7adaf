// ✍️ Name Normalization - Turns handwritten names into canonical display names
//
// "meatball_-_sub" → "Meatball Sub", "Riz@z RISO00tto!" → "Rizz Risotto"

/// Normalize a raw entry name.
///
/// - Hyphens and underscores become spaces
/// - Anything that is not a letter or whitespace is dropped
/// - Each word is title-cased
/// - Whitespace runs collapse to one space, edges trimmed
///
/// Returns `None` when nothing readable is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let letters: String = raw
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    let normalized = letters
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
