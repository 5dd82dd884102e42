//! Remote artwork listings: fetching, parsing, and per-run caching.
//!
//! The thumbnail server exposes one directory-index page per platform and
//! art type; every anchor on it is a percent-encoded artwork filename. A
//! listing is fetched at most once per run and shared by every resolution
//! that needs it.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::types::{ScrapeError, ScrapeResult};

/// Default thumbnail server.
pub const DEFAULT_BASE_URL: &str = "https://thumbnails.libretro.com";

/// Compiled regex for anchor hrefs in a directory-index page.
static RE_ANCHOR_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a href="([^"]+)">"#).expect("Invalid regex"));

/// Artwork category, each with its own remote listing folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtType {
    Boxart,
    Snap,
    Title,
}

impl ArtType {
    /// Folder name on the thumbnail server.
    pub fn remote_folder(self) -> &'static str {
        match self {
            ArtType::Boxart => "Named_Boxarts",
            ArtType::Snap => "Named_Snaps",
            ArtType::Title => "Named_Titles",
        }
    }
}

impl fmt::Display for ArtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.remote_folder())
    }
}

/// Listing transport: returns the raw directory-index markup for one
/// platform and art type.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch_listing(&self, platform: &str, art_type: ArtType) -> ScrapeResult<String>;
}

/// Production fetcher against an HTTP thumbnail server.
pub struct HttpListingFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpListingFetcher {
    pub fn new(base_url: impl Into<String>) -> ScrapeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ListingFetcher for HttpListingFetcher {
    async fn fetch_listing(&self, platform: &str, art_type: ArtType) -> ScrapeResult<String> {
        let url = format!("{}/{}/{}/", self.base_url, platform, art_type.remote_folder());
        log::debug!("Fetching listing: {url}");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Transport(format!(
                "listing for '{platform}' ({art_type}) returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}

/// Extract decoded artwork filenames from a directory-index page, in page
/// order. Hrefs are percent-encoded; the decoded value is the authoritative
/// remote filename.
pub fn parse_listing(body: &str) -> ScrapeResult<Vec<String>> {
    let mut names = Vec::new();
    for capture in RE_ANCHOR_HREF.captures_iter(body) {
        let href = &capture[1];
        let decoded = urlencoding::decode(href)
            .map_err(|e| ScrapeError::Listing(format!("undecodable href '{href}': {e}")))?;
        names.push(decoded.into_owned());
    }
    Ok(names)
}

type ListingKey = (String, ArtType);

/// Process-lifetime cache of remote listings.
///
/// Entries are populated on first demand and never refreshed within a run:
/// one network round trip per key, not per file. Each key holds its own
/// `OnceCell`, so concurrent resolutions of an unpopulated key share a
/// single in-flight fetch. A failed fetch leaves the key unpopulated; the
/// error propagates to that resolution attempt unmasked.
#[derive(Default)]
pub struct ListingCache {
    entries: Mutex<HashMap<ListingKey, Arc<OnceCell<Arc<Vec<String>>>>>>,
}

impl ListingCache {
    pub async fn get_or_fetch(
        &self,
        fetcher: &dyn ListingFetcher,
        platform: &str,
        art_type: ArtType,
    ) -> ScrapeResult<Arc<Vec<String>>> {
        let cell = {
            let mut entries = self.entries.lock().expect("lock listing cache");
            entries
                .entry((platform.to_string(), art_type))
                .or_default()
                .clone()
        };

        let listing = cell
            .get_or_try_init(|| async {
                let body = fetcher.fetch_listing(platform, art_type).await?;
                let names = parse_listing(&body)?;
                log::debug!("Cached {} entries for '{platform}' ({art_type})", names.len());
                Ok::<_, ScrapeError>(Arc::new(names))
            })
            .await?;

        Ok(listing.clone())
    }
}
