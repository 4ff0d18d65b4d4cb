//! Search-token normalization.
//!
//! Free-text fields (line name, starting point, extra info) are folded into
//! lower-case ASCII tokens so a downstream consumer can match user queries
//! without worrying about accents. The rule lives in one pure function and
//! is applied identically to every field.

use deunicode::deunicode;

/// Split `text` on whitespace and fold each token to lower-case ASCII.
///
/// Accented characters are transliterated to their closest plain-ASCII
/// form ("São" → "sao"); non-Latin scripts degrade to a best-effort
/// approximation per the transliteration table. Empty input yields an
/// empty sequence.
///
/// # Examples
///
/// ```
/// use fenix_crawler::tokenize::normalize;
///
/// assert_eq!(normalize("São Paulo"), vec!["sao", "paulo"]);
/// assert_eq!(normalize(""), Vec::<String>::new());
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| deunicode(&token.to_lowercase()).to_ascii_lowercase())
        .collect()
}
