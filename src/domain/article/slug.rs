// src/domain/article/slug.rs
//! Pure pieces of slug assignment: bounding a normalized title into a base
//! slug and enumerating the disambiguated candidates derived from it.

use crate::domain::article::value_objects::MAX_SLUG_LEN;

/// Length budget for the base, leaving room for a `-N` suffix.
pub const MAX_BASE_LEN: usize = 200;

/// Base used when a title normalizes to nothing (e.g. `"!!!"`).
pub const FALLBACK_BASE: &str = "article";

/// Upper bound on the number of candidates tried for one base.
pub const MAX_CANDIDATES: usize = 1000;

/// Path segments the browser pages use next to `/articles/{slug}`.
const RESERVED: &[&str] = &["new"];

pub fn is_reserved(candidate: &str) -> bool {
    RESERVED.contains(&candidate)
}

/// Turn slugified text into a non-empty base of at most [`MAX_BASE_LEN`]
/// characters without a trailing separator.
pub fn bounded_base(slugified: &str) -> String {
    let base = truncate_kebab(slugified, MAX_BASE_LEN);
    if base.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        base
    }
}

/// Build the `n`th candidate for `base`. The first candidate is the base
/// itself; later ones carry a `-n` suffix starting at 2. The result never
/// exceeds [`MAX_SLUG_LEN`].
pub fn candidate(base: &str, n: usize) -> String {
    if n <= 1 {
        return truncate_kebab(base, MAX_SLUG_LEN);
    }
    let suffix = format!("-{n}");
    let head = truncate_kebab(base, MAX_SLUG_LEN.saturating_sub(suffix.len()));
    if head.is_empty() {
        format!("{FALLBACK_BASE}{suffix}")
    } else {
        format!("{head}{suffix}")
    }
}

/// Iterator over `base`, `base-2`, `base-3`, … capped at [`MAX_CANDIDATES`].
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    (1..=MAX_CANDIDATES).map(move |n| candidate(base, n))
}

fn truncate_kebab(value: &str, max_chars: usize) -> String {
    let truncated: String = value.chars().take(max_chars).collect();
    truncated.trim_matches('-').to_string()
}
