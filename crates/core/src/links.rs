//! Amazon affiliate link rewriting for blog post HTML.
//!
//! Blog posts imported from older platforms carry Amazon URLs as plain text,
//! HTML-escaped query strings, and the occasional mangled URL from a
//! copy-paste (`amazon.com)?tag=...`, doubled `tag=` parameters pointing at
//! someone else's associate ID). These helpers repair the damage and make
//! every Amazon reference a clickable link carrying our tag.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Anchor text used when wrapping a bare URL.
const LINK_TEXT: &str = "Shop on Amazon";

static AMAZON_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?amazon\.com/[^\s<>"']+"#).expect("Invalid regex")
});

static AMZN_SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://amzn\.to/[^\s<>"']+"#).expect("Invalid regex"));

/// Doubled tag parameters, plain or with an HTML-escaped ampersand.
static DOUBLE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tag=[a-z0-9-]+(?:&amp;|&)tag=[a-z0-9-]+").expect("Invalid regex")
});

/// Append `tag={tag}` to a URL unless a tag parameter is already present.
#[must_use]
pub fn append_tag(url: &str, tag: &str) -> String {
    if url.contains("tag=") {
        return url.to_owned();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}tag={tag}")
}

/// Whether the HTML contains a bare Amazon URL outside of an `href`.
#[must_use]
pub fn has_plain_links(html: &str) -> bool {
    [&AMAZON_URL_RE, &AMZN_SHORT_RE].iter().any(|re| {
        re.find_iter(html)
            .any(|m| !inside_href(html, m.start()))
    })
}

/// Whether the HTML contains a mangled Amazon URL.
#[must_use]
pub fn has_malformed_links(html: &str) -> bool {
    html.contains("amazon.com)?tag=") || DOUBLE_TAG_RE.is_match(html)
}

/// Wrap bare Amazon URLs in affiliate-tagged anchors.
///
/// URLs already inside an `href` attribute are left alone. Each rewritten
/// URL is unescaped (`&amp;` to `&`), stripped of a trailing `)`, given the
/// affiliate tag, and replaced with a "Shop on Amazon" link. Returns the
/// rewritten HTML and the number of links fixed.
#[must_use]
pub fn rewrite_plain_links(html: &str, tag: &str) -> (String, usize) {
    let mut fixes = 0;
    let pass_one = wrap_bare_urls(html, &AMAZON_URL_RE, tag, &mut fixes);
    let pass_two = wrap_bare_urls(&pass_one, &AMZN_SHORT_RE, tag, &mut fixes);
    (pass_two, fixes)
}

/// Repair mangled Amazon URLs: a `)` fused into the query string, and
/// doubled `tag=` parameters collapsed down to ours.
#[must_use]
pub fn fix_malformed(html: &str, tag: &str) -> String {
    let unfused = html.replace("amazon.com)?tag=", "amazon.com?tag=");
    let replacement = format!("tag={tag}");
    DOUBLE_TAG_RE
        .replace_all(&unfused, |_: &Captures<'_>| replacement.clone())
        .into_owned()
}

fn wrap_bare_urls(html: &str, re: &Regex, tag: &str, fixes: &mut usize) -> String {
    re.replace_all(html, |caps: &Captures<'_>| {
        caps.get(0).map_or_else(String::new, |m| {
            if inside_href(html, m.start()) {
                return m.as_str().to_owned();
            }
            *fixes += 1;
            let url = clean_url(m.as_str(), tag);
            format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{LINK_TEXT}</a>"#)
        })
    })
    .into_owned()
}

fn clean_url(url: &str, tag: &str) -> String {
    let unescaped = url.replace("&amp;", "&");
    let trimmed = unescaped.strip_suffix(')').unwrap_or(&unescaped);
    append_tag(trimmed, tag)
}

/// Whether the byte offset falls inside an unterminated `href` attribute
/// value, i.e. the URL is already the target of a link.
fn inside_href(html: &str, start: usize) -> bool {
    let Some(head) = html.get(..start) else {
        return false;
    };
    let double = head.rfind("href=\"").map(|pos| (pos, '"'));
    let single = head.rfind("href='").map(|pos| (pos, '\''));
    let Some((pos, quote)) = double.into_iter().chain(single).max_by_key(|&(pos, _)| pos) else {
        return false;
    };
    head.get(pos + "href=\"".len()..)
        .is_some_and(|attr| !attr.contains(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &str = "shelzysdesigns-20";

    #[test]
    fn test_append_tag_adds_query() {
        assert_eq!(
            append_tag("https://www.amazon.com/dp/B08XYZ", TAG),
            "https://www.amazon.com/dp/B08XYZ?tag=shelzysdesigns-20"
        );
    }

    #[test]
    fn test_append_tag_joins_existing_query() {
        assert_eq!(
            append_tag("https://www.amazon.com/s?k=tumbler", TAG),
            "https://www.amazon.com/s?k=tumbler&tag=shelzysdesigns-20"
        );
    }

    #[test]
    fn test_append_tag_skips_when_present() {
        let url = "https://www.amazon.com/dp/B08XYZ?tag=shelzysdesigns-20";
        assert_eq!(append_tag(url, TAG), url);
    }

    #[test]
    fn test_rewrite_wraps_bare_url() {
        let html = "<p>Check this out: https://www.amazon.com/dp/B08XYZ today</p>";
        let (updated, fixes) = rewrite_plain_links(html, TAG);
        assert_eq!(fixes, 1);
        assert_eq!(
            updated,
            "<p>Check this out: <a href=\"https://www.amazon.com/dp/B08XYZ?tag=shelzysdesigns-20\" \
             target=\"_blank\" rel=\"noopener noreferrer\">Shop on Amazon</a> today</p>"
        );
    }

    #[test]
    fn test_rewrite_skips_url_in_href() {
        let html = r#"<a href="https://www.amazon.com/dp/B08XYZ?tag=shelzysdesigns-20">buy</a>"#;
        let (updated, fixes) = rewrite_plain_links(html, TAG);
        assert_eq!(fixes, 0);
        assert_eq!(updated, html);
    }

    #[test]
    fn test_rewrite_skips_url_deep_in_href_value() {
        let html = r#"<a href="/out?u=https://www.amazon.com/dp/B08XYZ">buy</a>"#;
        let (_, fixes) = rewrite_plain_links(html, TAG);
        assert_eq!(fixes, 0);
    }

    #[test]
    fn test_rewrite_after_closed_href_still_fires() {
        let html = r#"<a href="/shop">shop</a> or https://amzn.to/3abc"#;
        let (updated, fixes) = rewrite_plain_links(html, TAG);
        assert_eq!(fixes, 1);
        assert!(updated.contains("https://amzn.to/3abc?tag=shelzysdesigns-20"));
    }

    #[test]
    fn test_rewrite_unescapes_and_trims_paren() {
        let html = "(see https://www.amazon.com/s?k=cup&amp;ref=nb)";
        let (updated, fixes) = rewrite_plain_links(html, TAG);
        assert_eq!(fixes, 1);
        assert!(updated.contains(r#"href="https://www.amazon.com/s?k=cup&ref=nb&tag=shelzysdesigns-20""#));
    }

    #[test]
    fn test_rewrite_counts_both_domains() {
        let html = "https://www.amazon.com/dp/A and https://amzn.to/b";
        let (_, fixes) = rewrite_plain_links(html, TAG);
        assert_eq!(fixes, 2);
    }

    #[test]
    fn test_fix_malformed_fused_paren() {
        let html = "https://www.amazon.com)?tag=shelzysdesigns-20";
        assert_eq!(
            fix_malformed(html, TAG),
            "https://www.amazon.com?tag=shelzysdesigns-20"
        );
    }

    #[test]
    fn test_fix_malformed_double_tag() {
        let html = "dp/B08?tag=spinshoespe0a-20&tag=shelzysdesigns-20";
        assert_eq!(fix_malformed(html, TAG), "dp/B08?tag=shelzysdesigns-20");
    }

    #[test]
    fn test_fix_malformed_double_tag_escaped() {
        let html = "dp/B08?tag=spinshoespe0a-20&amp;tag=shelzysdesigns-20";
        assert_eq!(fix_malformed(html, TAG), "dp/B08?tag=shelzysdesigns-20");
    }

    #[test]
    fn test_has_plain_links() {
        assert!(has_plain_links("visit https://www.amazon.com/dp/B08XYZ"));
        assert!(!has_plain_links(
            r#"<a href="https://www.amazon.com/dp/B08XYZ">x</a>"#
        ));
        assert!(!has_plain_links("<p>no links here</p>"));
    }

    #[test]
    fn test_has_malformed_links() {
        assert!(has_malformed_links("x amazon.com)?tag=abc"));
        assert!(has_malformed_links("?tag=aaa-20&tag=bbb-20"));
        assert!(!has_malformed_links(
            "https://www.amazon.com/dp/B08?tag=shelzysdesigns-20"
        ));
    }
}
