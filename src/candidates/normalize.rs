use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Case-folds a name token; with `transliterate` the token is also folded
/// to ASCII and stripped of anything but `[a-z0-9]`.
///
/// The function is idempotent: normalizing its own output is a no-op.
pub fn normalize_token(token: &str, transliterate: bool) -> String {
    let lower = token.to_lowercase();
    if !transliterate {
        return lower;
    }
    fold_to_ascii(&lower)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalizes every token of one person, dropping tokens left empty.
pub fn normalize_tokens(tokens: &[String], transliterate: bool) -> Vec<String> {
    tokens
        .iter()
        .map(|token| normalize_token(token, transliterate))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Compatibility decomposition strips accents and expands ligatures; what
/// is left outside ASCII (Cyrillic, Greek, CJK, ...) is transliterated.
fn fold_to_ascii(text: &str) -> String {
    let decomposed: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    deunicode::deunicode(&decomposed)
}
