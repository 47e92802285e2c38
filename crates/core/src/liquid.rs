//! Idempotent Liquid render-tag injection for theme assets.
//!
//! Theme surgery here is deliberately dumb: markers are matched as literal
//! text, with no Liquid grammar awareness. A marker inside a comment would
//! still match. The three rules that make this safe to re-run:
//!
//! 1. If the asset already references the snippet, do nothing.
//! 2. Splice the render tag around the *first* occurrence of the marker.
//! 3. If the marker is not found, report it and leave the asset unchanged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches `{% render 'name' %}` and `{% include 'name' %}` tags, capturing
/// the snippet name. An optional trailing newline is consumed so removal
/// does not leave blank lines behind.
static RENDER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\{%\s*(?:render|include)\s*['"]([A-Za-z0-9_-]+)['"]\s*%\}\n?"#)
        .expect("Invalid regex")
});

/// Where to splice the render tag relative to the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Insert the tag on its own line immediately before the marker.
    Before,
    /// Insert the tag on its own line immediately after the marker.
    After,
}

/// Result of an injection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
    /// The tag was spliced in; the new asset content is attached.
    Injected(String),
    /// The asset already references the snippet; nothing to do.
    AlreadyPresent,
    /// The marker does not occur in the asset; content left unchanged.
    MarkerNotFound,
}

/// Render tag for a snippet name, e.g. `{% render 'sz-shipping-bar' %}`.
#[must_use]
pub fn render_tag(name: &str) -> String {
    format!("{{% render '{name}' %}}")
}

/// Whether the content already references the snippet.
///
/// Matches either the exact render tag or the looser `render 'name'`
/// substring, so hand-edited spacing variants still count as present.
#[must_use]
pub fn contains_render(content: &str, name: &str) -> bool {
    content.contains(&render_tag(name)) || content.contains(&format!("render '{name}'"))
}

/// Splice a render tag for `snippet` around the first occurrence of `marker`.
///
/// Idempotent: if the snippet is already referenced anywhere in the content,
/// returns [`InjectOutcome::AlreadyPresent`] without touching it.
#[must_use]
pub fn inject(content: &str, marker: &str, placement: Placement, snippet: &str) -> InjectOutcome {
    if contains_render(content, snippet) {
        return InjectOutcome::AlreadyPresent;
    }

    let Some((head, tail)) = content.split_once(marker) else {
        return InjectOutcome::MarkerNotFound;
    };

    let tag = render_tag(snippet);
    let updated = match placement {
        Placement::Before => format!("{head}\n  {tag}\n{marker}{tail}"),
        Placement::After => format!("{head}{marker}\n  {tag}{tail}"),
    };

    InjectOutcome::Injected(updated)
}

/// Remove every render/include tag for `name` from the content.
///
/// Returns the stripped content, or `None` if no tag was found. Tags for
/// other snippets are left untouched.
#[must_use]
pub fn remove_render(content: &str, name: &str) -> Option<String> {
    let mut removed = false;
    let stripped = RENDER_TAG_RE.replace_all(content, |caps: &Captures<'_>| {
        if caps.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case(name)) {
            removed = true;
            String::new()
        } else {
            caps.get(0)
                .map_or_else(String::new, |m| m.as_str().to_owned())
        }
    });

    removed.then(|| stripped.into_owned())
}
