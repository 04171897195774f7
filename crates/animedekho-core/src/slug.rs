//! Title to URL slug conversion
//!
//! The site is not consistent about how titles appear in episode paths,
//! so every title yields two variants: the plain hyphenated slug and its
//! form-urlencoded counterpart.

use std::sync::LazyLock;

use regex::Regex;

// Letters, numbers (including `½`-style numerics) and underscore; combining
// marks and other connector punctuation are dropped.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s-]").expect("static slug pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static slug pattern"));
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("static slug pattern"));

/// Builds the hyphenated slug for a title
///
/// Lowercases, drops everything except letters, numbers, underscores,
/// whitespace and hyphens, turns whitespace runs into single hyphens and trims hyphens
/// from both ends.
///
/// # Example
/// ```
/// use animedekho_core::slug::slugify;
/// assert_eq!(slugify("  Attack on Titan: Final Season "), "attack-on-titan-final-season");
/// ```
pub fn slugify(title: &str) -> String {
    let base = title.trim().to_lowercase();
    let base = DISALLOWED.replace_all(&base, "");
    let base = WHITESPACE.replace_all(&base, "-");
    let base = HYPHENS.replace_all(&base, "-");
    base.trim_matches('-').to_string()
}

/// Builds both slug variants for a title
///
/// # Returns
/// `[hyphenated, percent_encoded]`. Either may be empty when the title
/// consists only of punctuation, so callers should reject blank titles first.
///
/// # Example
/// ```
/// use animedekho_core::slug::make_slugs;
/// let [plain, encoded] = make_slugs("Shinchan!! 2024");
/// assert_eq!(plain, "shinchan-2024");
/// assert_eq!(encoded, "shinchan-2024");
/// ```
pub fn make_slugs(title: &str) -> [String; 2] {
    let plain = slugify(title);
    let encoded = urlencoding::encode(&plain).into_owned();
    [plain, encoded]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_make_slugs_strips_punctuation() {
        assert_eq!(
            make_slugs("Shinchan!! 2024"),
            ["shinchan-2024".to_string(), "shinchan-2024".to_string()]
        );
    }

    #[test]
    fn test_make_slugs_collapses_spaces() {
        let [plain, _] = make_slugs("One  Piece");
        assert_eq!(plain, "one-piece");
    }

    #[test]
    fn test_slugify_collapses_mixed_separators() {
        assert_eq!(slugify("Naruto -- Shippuden"), "naruto-shippuden");
        assert_eq!(slugify("\tDemon\n Slayer "), "demon-slayer");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("-Bleach-"), "bleach");
        assert_eq!(slugify("!!! - Dr. Stone - !!!"), "dr-stone");
    }

    #[test]
    fn test_slugify_keeps_underscores_and_digits() {
        assert_eq!(slugify("Mob_Psycho 100"), "mob_psycho-100");
    }

    #[test]
    fn test_slugify_only_punctuation_is_empty() {
        assert_eq!(make_slugs("?!."), [String::new(), String::new()]);
    }

    #[test]
    fn test_encoded_variant_escapes_non_ascii() {
        let [plain, encoded] = make_slugs("Pokémon");
        assert_eq!(plain, "pokémon");
        assert_eq!(encoded, "pok%C3%A9mon");
    }

    #[test]
    fn test_slugify_keeps_numeric_symbols() {
        assert_eq!(
            make_slugs("Ranma ½"),
            ["ranma-½".to_string(), "ranma-%C2%BD".to_string()]
        );
    }

    #[test]
    fn test_slugify_drops_combining_marks() {
        assert_eq!(slugify("e\u{301}x"), "ex");
        assert_eq!(slugify("Poke\u{301}mon"), "pokemon");
    }

    #[test]
    fn test_slugify_drops_non_underscore_connectors() {
        assert_eq!(slugify("a\u{203F}b_c"), "ab_c");
    }

    #[test]
    fn test_make_slugs_is_deterministic() {
        assert_eq!(make_slugs("Jujutsu Kaisen"), make_slugs("Jujutsu Kaisen"));
    }

    proptest! {
        #[test]
        fn prop_plain_slug_is_normalized(title in "[A-Za-z0-9 -]{0,40}") {
            let [plain, _] = make_slugs(&title);
            prop_assert_eq!(plain.clone(), plain.to_lowercase());
            prop_assert!(!plain.starts_with('-'));
            prop_assert!(!plain.ends_with('-'));
            prop_assert!(!plain.chars().any(char::is_whitespace));
            prop_assert!(!plain.contains("--"));
        }

        #[test]
        fn prop_ascii_slug_needs_no_encoding(title in "[A-Za-z0-9 _-]{0,40}") {
            let [plain, encoded] = make_slugs(&title);
            prop_assert_eq!(plain, encoded);
        }
    }
}
