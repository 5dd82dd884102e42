//! Runtime configuration consumed by the resolution engine.

use serde::{Deserialize, Serialize};

use crate::services::listing::ArtType;

/// Which artwork categories a run targets. The paired variants resolve two
/// art types so the caller can composite them into one output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtSelection {
    Boxart,
    Snap,
    Title,
    BoxAndSnap,
    BoxAndTitle,
}

impl ArtSelection {
    /// Primary art type, plus the optional secondary one for composites.
    pub fn art_types(self) -> (ArtType, Option<ArtType>) {
        match self {
            ArtSelection::Boxart => (ArtType::Boxart, None),
            ArtSelection::Snap => (ArtType::Snap, None),
            ArtSelection::Title => (ArtType::Title, None),
            ArtSelection::BoxAndSnap => (ArtType::Boxart, Some(ArtType::Snap)),
            ArtSelection::BoxAndTitle => (ArtType::Boxart, Some(ArtType::Title)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrapeConfig {
    /// Enable the AI-assisted disambiguation tier.
    pub ai: bool,
    /// Model identifier forwarded verbatim to the completion endpoint.
    pub ai_model: String,
    /// Region preference order, forwarded into the disambiguation prompt.
    /// Not otherwise enforced.
    pub regions: Vec<String>,
    /// Artwork categories to resolve.
    pub art: ArtSelection,
    /// Re-scrape files whose artwork already exists. Acted on by the caller
    /// that walks the library, carried here so one config describes a run.
    pub force: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            ai: false,
            ai_model: "llama3.2".to_string(),
            regions: vec![
                "USA".to_string(),
                "World".to_string(),
                "Europe".to_string(),
                "Japan".to_string(),
            ],
            art: ArtSelection::Boxart,
            force: false,
        }
    }
}
