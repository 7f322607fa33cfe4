//! Link previews for dcinside gallery board posts.
//!
//! A message whose entire content is one board link is unfurled into an
//! embed. Page metadata comes from the post's meta tags; fetched previews
//! are cached so repeated links within the TTL do not refetch the page.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::{cache::PreviewCache, error::AppError, model::preview::PagePreview};

/// How long a fetched preview stays valid.
pub const PREVIEW_TTL: Duration = Duration::from_secs(60);

/// Capacity of the preview cache.
pub const PREVIEW_CACHE_CAPACITY: usize = 128;

static BOARD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(m\.)?gall\.dcinside\.com/board/view\?\S+$").unwrap()
});

static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\s[^>]*>").unwrap());
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)([a-z-]+)\s*=\s*"([^"]*)""#).unwrap());
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Returns the board link when the message content is exactly one link to a
/// gallery board post, desktop or mobile host. Links embedded in longer
/// messages are left alone.
pub fn board_link(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if BOARD_LINK_RE.is_match(trimmed) {
        Some(trimmed)
    } else {
        None
    }
}

/// Normalizes a board link to the desktop host, keeping scheme, path and
/// query. Mobile and desktop links to the same post share one cache entry.
/// A URL the parser rejects is used as-is.
pub fn normalize_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.set_host(Some("gall.dcinside.com")).is_err() {
                return raw.to_string();
            }
            parsed.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// Service for fetching and caching page previews.
pub struct LinkPreviewService<'a> {
    client: &'a reqwest::Client,
    cache: &'a PreviewCache,
}

impl<'a> LinkPreviewService<'a> {
    pub fn new(client: &'a reqwest::Client, cache: &'a PreviewCache) -> Self {
        Self { client, cache }
    }

    /// Returns the preview for a normalized board URL, from cache when fresh.
    ///
    /// # Returns
    /// - `Ok(PagePreview)` - Parsed metadata, now cached
    /// - `Err(AppError::ReqwestErr)` - Fetch failed or non-success status
    pub async fn fetch_preview(&self, url: &str) -> Result<PagePreview, AppError> {
        if let Some(hit) = self.cache.get(url) {
            return Ok(hit);
        }

        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;

        let preview = parse_preview(&html);
        self.cache.insert(url, preview.clone());
        tracing::debug!("Cached preview for {}", url);

        Ok(preview)
    }
}

/// Extracts preview metadata from a post page.
///
/// Board pages carry Open Graph tags plus a dcinside-specific
/// `meta[name=subject]` holding the gallery name; each field falls back in
/// turn before the hardcoded default.
pub fn parse_preview(html: &str) -> PagePreview {
    let title = meta_content(html, "property", "og:title")
        .or_else(|| title_text(html))
        .unwrap_or_else(|| "dcinside post".to_string());

    let gallery = meta_content(html, "name", "subject")
        .or_else(|| meta_content(html, "property", "og:site_name"))
        .unwrap_or_else(|| "dcinside".to_string());

    let image = meta_content(html, "property", "og:image");

    let summary = meta_content(html, "property", "og:description")
        .or_else(|| meta_content(html, "name", "description"));

    PagePreview {
        title,
        gallery,
        image,
        summary,
    }
}

/// Finds the `content` of the first meta tag whose `key` attribute equals
/// `value`. Attribute order inside the tag does not matter.
fn meta_content(html: &str, key: &str, value: &str) -> Option<String> {
    for tag in META_TAG_RE.find_iter(html) {
        let attrs: HashMap<String, &str> = ATTR_RE
            .captures_iter(tag.as_str())
            .map(|caps| {
                (
                    caps[1].to_ascii_lowercase(),
                    caps.get(2).map(|m| m.as_str()).unwrap_or(""),
                )
            })
            .collect();

        if attrs.get(key).is_some_and(|v| v.eq_ignore_ascii_case(value)) {
            return attrs
                .get("content")
                .map(|content| decode_entities(content.trim()))
                .filter(|content| !content.is_empty());
        }
    }
    None
}

fn title_text(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .filter(|text| !text.is_empty())
}

/// Decodes the handful of named and numeric entities board pages use in
/// their meta tags.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&nbsp;", " ")
}
