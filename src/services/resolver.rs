//! The per-file resolution cascade and the run context that drives it.
//!
//! Pipeline order per (file, platform, art-type) request:
//! exact listing entry → annotation-stripped search → DX-stripped search →
//! subtitle-stripped search → fallback platforms → miss. Each tier either
//! produces the final outcome or yields to the next.

use std::path::Path;
use std::sync::Arc;

use crate::services::catalog;
use crate::services::config::ScrapeConfig;
use crate::services::listing::{
    ArtType, HttpListingFetcher, ListingCache, ListingFetcher, DEFAULT_BASE_URL,
};
use crate::services::matcher::{self, MatchSource};
use crate::services::matcher::assistant::{CompletionProvider, OllamaProvider, DEFAULT_OLLAMA_URL};
use crate::services::normalizer;
use crate::services::stats::{RunStats, StatsSnapshot};
use crate::types::{ScrapeError, ScrapeResult};

/// Outcome of one (file, art-type) resolution. Exactly one per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The sanitized file name was literally present in the listing.
    Exact(String),
    /// Closest-by-edit-distance over a substring-filtered candidate set.
    Partial(String),
    /// The assistant tier picked among the candidates.
    Assistant(String),
    Miss,
}

impl MatchOutcome {
    /// The resolved artwork URL, when any tier produced one.
    pub fn url(&self) -> Option<&str> {
        match self {
            MatchOutcome::Exact(url)
            | MatchOutcome::Partial(url)
            | MatchOutcome::Assistant(url) => Some(url),
            MatchOutcome::Miss => None,
        }
    }
}

/// Run context: owns the listing cache, the outcome counters and the
/// transport providers. Construct one per run; [`ArtResolver::resolve`]
/// takes `&self`, so independent files may be resolved concurrently.
pub struct ArtResolver {
    fetcher: Arc<dyn ListingFetcher>,
    assistant: Arc<dyn CompletionProvider>,
    config: ScrapeConfig,
    base_url: String,
    cache: ListingCache,
    stats: RunStats,
}

impl ArtResolver {
    /// Resolver with the default HTTP transports.
    pub fn new(config: ScrapeConfig) -> ScrapeResult<Self> {
        let fetcher = Arc::new(HttpListingFetcher::new(DEFAULT_BASE_URL)?);
        let assistant = Arc::new(OllamaProvider::new(DEFAULT_OLLAMA_URL));
        Ok(Self::with_providers(config, fetcher, assistant, DEFAULT_BASE_URL))
    }

    /// Resolver with injected transports (tests, alternate servers).
    pub fn with_providers(
        config: ScrapeConfig,
        fetcher: Arc<dyn ListingFetcher>,
        assistant: Arc<dyn CompletionProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            assistant,
            config,
            base_url: base_url.into(),
            cache: ListingCache::default(),
            stats: RunStats::default(),
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Snapshot of the run counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Count a file the caller skipped (artwork already present).
    pub fn record_skipped(&self) {
        self.stats.record_skipped();
    }

    /// Resolve one file against one platform listing, following the
    /// platform's fallback chain when its own listing yields nothing.
    ///
    /// An unknown platform id (primary or fallback) is a configuration
    /// error, not a miss: counters stay untouched and the caller must not
    /// treat it as "no artwork available".
    pub async fn resolve(
        &self,
        file_path: &str,
        platform_id: &str,
        art_type: ArtType,
    ) -> ScrapeResult<MatchOutcome> {
        let record = catalog::platform(platform_id)
            .ok_or_else(|| ScrapeError::UnknownPlatform(platform_id.to_string()))?;

        let outcome = self.run_cascade(file_path, platform_id, art_type).await?;
        if outcome != MatchOutcome::Miss {
            return Ok(outcome);
        }

        // One level only: a fallback's own chain is never followed, so
        // mutually-referencing platforms cannot recurse.
        for fallback_id in record.fallbacks {
            catalog::platform(fallback_id)
                .ok_or_else(|| ScrapeError::UnknownPlatform(fallback_id.to_string()))?;

            let outcome = self.run_cascade(file_path, fallback_id, art_type).await?;
            if outcome != MatchOutcome::Miss {
                log::debug!("Match found in fallback platform '{fallback_id}' for \"{file_path}\"");
                return Ok(outcome);
            }
            log::debug!("No match in fallback platform '{fallback_id}' for \"{file_path}\"");
        }

        self.stats.record_miss();
        Ok(MatchOutcome::Miss)
    }

    /// The tiers that operate on a single platform's listing. Returns
    /// `Miss` without counting it; miss accounting belongs to
    /// [`Self::resolve`], once per resolution regardless of fallbacks tried.
    async fn run_cascade(
        &self,
        file_path: &str,
        platform_id: &str,
        art_type: ArtType,
    ) -> ScrapeResult<MatchOutcome> {
        let listing = self
            .cache
            .get_or_fetch(self.fetcher.as_ref(), platform_id, art_type)
            .await?;

        let file_name = file_stem(file_path);

        // Exact listing entry: no normalization, no scoring.
        let png_name = normalizer::sanitize_remote_name(&format!("{file_name}.png"));
        if listing.contains(&png_name) {
            log::debug!("Exact match for \"{file_name}\"");
            self.stats.record_exact();
            return Ok(MatchOutcome::Exact(self.art_url(platform_id, art_type, &png_name)));
        }

        // Progressively shorter search keys, each more permissive than the
        // previous: annotations, then DX markers, then subtitles.
        let stripped = normalizer::strip_annotations(&file_name);
        let dx_stripped = normalizer::strip_dx(&stripped);
        let searches = [
            stripped.clone(),
            dx_stripped.clone(),
            normalizer::strip_subtitle(&dx_stripped),
        ];

        for search in &searches {
            if let Some(outcome) = self
                .match_tier(search, &file_name, &listing, platform_id, art_type)
                .await
            {
                return Ok(outcome);
            }
        }

        Ok(MatchOutcome::Miss)
    }

    /// One stripped-search tier: filter the listing down to entries
    /// containing the sanitized search term, then let the matchers pick.
    async fn match_tier(
        &self,
        search: &str,
        file_name: &str,
        listing: &[String],
        platform_id: &str,
        art_type: ArtType,
    ) -> Option<MatchOutcome> {
        let needle = normalizer::sanitize_remote_name(search);
        let candidates: Vec<String> = listing
            .iter()
            .filter(|entry| entry.contains(&needle))
            .cloned()
            .collect();

        let best = matcher::find_best_match(
            self.assistant.as_ref(),
            search,
            file_name,
            &candidates,
            &self.config,
            &self.stats,
        )
        .await;

        best.map(|(name, source)| {
            let url = self.art_url(platform_id, art_type, &name);
            match source {
                MatchSource::Assistant => MatchOutcome::Assistant(url),
                MatchSource::EditDistance => MatchOutcome::Partial(url),
            }
        })
    }

    fn art_url(&self, platform_id: &str, art_type: ArtType, name: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url,
            platform_id,
            art_type.remote_folder(),
            name
        )
    }
}

/// File name without directories or the final extension.
fn file_stem(file_path: &str) -> String {
    Path::new(file_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
