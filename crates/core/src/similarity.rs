//! Duplicate blog post detection by title similarity.
//!
//! Years of content experiments left the blog with near-identical posts
//! ("Teacher Gift Guide 2024", "Teacher Gift Guide", "Teacher Gifts Guide").
//! Titles are normalized to strip the noise words and compared by exact
//! match, containment, or word overlap.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Word-overlap ratio above which two titles count as duplicates.
const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Words shorter than this are ignored in the overlap comparison.
const MIN_WORD_LEN: usize = 3;

static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").expect("Invalid regex"));

/// Normalize a title for comparison.
///
/// Lowercases, strips punctuation, collapses whitespace, drops four-digit
/// years and the word "guide", and folds plural variants that kept showing
/// up across re-published posts.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let no_punct = PUNCT_RE.replace_all(&lowered, "");
    let spaced = WHITESPACE_RE.replace_all(&no_punct, " ");
    let no_years = YEAR_RE.replace_all(&spaced, "");
    no_years
        .replace("guide", "")
        .replace("essentials", "essential")
        .replace("must haves", "musthave")
        .replace("musthaves", "musthave")
        .replace("finds", "find")
        .trim()
        .to_owned()
}

/// Whether two titles are close enough to be the same post.
#[must_use]
pub fn are_similar(first: &str, second: &str) -> bool {
    let norm_a = normalize_title(first);
    let norm_b = normalize_title(second);

    if norm_a == norm_b {
        return true;
    }
    if norm_a.contains(&norm_b) || norm_b.contains(&norm_a) {
        return true;
    }

    let words_a: HashSet<&str> = norm_a.split(' ').filter(|w| w.len() > MIN_WORD_LEN).collect();
    let words_b: HashSet<&str> = norm_b.split(' ').filter(|w| w.len() > MIN_WORD_LEN).collect();

    let smaller = words_a.len().min(words_b.len());
    if smaller == 0 {
        return false;
    }

    let common = words_a.intersection(&words_b).count();

    #[allow(clippy::cast_precision_loss)] // Title word counts are tiny
    let similarity = common as f64 / smaller as f64;

    similarity > SIMILARITY_THRESHOLD
}

/// Group indices of titles that look like duplicates of each other.
///
/// Single pass: each unclaimed title seeds a group and claims every later
/// title similar to it. Only groups with more than one member are returned,
/// in seed order.
#[must_use]
pub fn duplicate_groups(titles: &[&str]) -> Vec<Vec<usize>> {
    let mut groups = Vec::new();
    let mut claimed: HashSet<usize> = HashSet::new();

    for (i, seed) in titles.iter().enumerate() {
        if claimed.contains(&i) {
            continue;
        }
        claimed.insert(i);

        let mut group = vec![i];
        for (j, candidate) in titles.iter().enumerate().skip(i + 1) {
            if claimed.contains(&j) {
                continue;
            }
            if are_similar(seed, candidate) {
                group.push(j);
                claimed.insert(j);
            }
        }

        if group.len() > 1 {
            groups.push(group);
        }
    }

    groups
}
