//! Resolves local ROM files to their best-matching remote artwork image.
//!
//! The entry point is [`ArtResolver`]: construct one per run, hand it a file
//! path, a platform id and an art type, and it returns the winning artwork
//! URL (or a miss) after walking the match cascade. Platform detection for
//! raw paths lives in [`services::catalog`].

pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::catalog::{is_rom_folder, lookup_platform, PlatformRecord};
pub use services::config::{ArtSelection, ScrapeConfig};
pub use services::listing::{ArtType, HttpListingFetcher, ListingFetcher, DEFAULT_BASE_URL};
pub use services::matcher::assistant::{CompletionProvider, OllamaProvider};
pub use services::resolver::{ArtResolver, MatchOutcome};
pub use services::stats::StatsSnapshot;
pub use types::{ScrapeError, ScrapeResult};
