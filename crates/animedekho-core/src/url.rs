//! URL helper functions for animedekho.co
//!
//! Provides functions for building the episode page candidates tried
//! by the scanner.

use crate::slug::make_slugs;

/// Site root episode pages are resolved against
pub const BASE_URL: &str = "https://animedekho.co";

/// Builds the four episode page candidates for one slug
///
/// The site files episodes under either `/epi/` or `/episodes/`, and
/// joins the season/episode marker to the slug with either `-` or `/`.
///
/// # Arguments
/// * `slug` - URL slug of the title (e.g., "naruto")
/// * `season` - Season number as given by the caller (e.g., "1")
/// * `episode` - Episode number as given by the caller (e.g., "5")
///
/// # Returns
/// Candidates in the order they should be tried
///
/// # Example
/// ```
/// use animedekho_core::url::build_candidate_urls;
/// let urls = build_candidate_urls("naruto", "1", "5");
/// assert_eq!(urls[0], "https://animedekho.co/epi/naruto-1x5/");
/// assert_eq!(urls[3], "https://animedekho.co/episodes/naruto/1x5/");
/// ```
pub fn build_candidate_urls(slug: &str, season: &str, episode: &str) -> [String; 4] {
    build_candidate_urls_on(BASE_URL, slug, season, episode)
}

/// Same as [`build_candidate_urls`] against an arbitrary site root
///
/// A trailing slash on `base` is ignored.
pub fn build_candidate_urls_on(base: &str, slug: &str, season: &str, episode: &str) -> [String; 4] {
    let base = base.trim_end_matches('/');
    let marker = format!("{}x{}", season, episode);
    [
        format!("{}/epi/{}-{}/", base, slug, marker),
        format!("{}/episodes/{}-{}/", base, slug, marker),
        format!("{}/epi/{}/{}/", base, slug, marker),
        format!("{}/episodes/{}/{}/", base, slug, marker),
    ]
}

/// Builds the full ordered candidate list for a title
///
/// Four candidates per slug variant, hyphenated slug first. Duplicates
/// are kept when both variants are identical.
pub fn candidate_urls(title: &str, season: &str, episode: &str) -> Vec<String> {
    candidate_urls_on(BASE_URL, title, season, episode)
}

/// Same as [`candidate_urls`] against an arbitrary site root
pub fn candidate_urls_on(base: &str, title: &str, season: &str, episode: &str) -> Vec<String> {
    make_slugs(title)
        .iter()
        .flat_map(|slug| build_candidate_urls_on(base, slug, season, episode))
        .collect()
}
