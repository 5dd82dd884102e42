//! Candidate disambiguation: deterministic string similarity, plus the
//! optional AI-assisted tier in [`assistant`].

pub mod assistant;

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::services::config::ScrapeConfig;
use crate::services::normalizer;
use crate::services::stats::RunStats;
use assistant::CompletionProvider;

/// Minimum Jaro-Winkler similarity for the fuzzy filter (inclusive).
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// Cap on distinct normalized forms kept by the fuzzy filter.
pub const FUZZY_LIMIT: usize = 25;

/// Which sub-component produced a best match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Assistant,
    EditDistance,
}

/// Best single candidate by Levenshtein distance over annotation-stripped
/// forms. Ties resolve to the first minimal element; the returned value is
/// the original (unstripped) candidate. `None` only for empty input.
pub fn closest_match(search: &str, candidates: &[String]) -> Option<String> {
    let stripped_search = normalizer::strip_annotations(search);
    candidates
        .iter()
        .min_by_key(|candidate| {
            strsim::levenshtein(&stripped_search, &normalizer::strip_annotations(candidate))
        })
        .cloned()
}

/// Fuzzy top-N filter.
///
/// Scores every annotation-stripped candidate against the search term,
/// keeps those at or above [`FUZZY_THRESHOLD`], and caps the result at
/// [`FUZZY_LIMIT`] distinct stripped forms by descending similarity. The
/// kept forms are then re-expanded to every original candidate they came
/// from, preserving listing order — so the returned count can exceed the
/// cap when several originals strip to the same form.
pub fn fuzzy_filter(search: &str, candidates: &[String]) -> Vec<String> {
    let stripped: Vec<String> = candidates
        .iter()
        .map(|candidate| normalizer::strip_annotations(candidate))
        .collect();

    let mut scored: Vec<(&str, f64)> = stripped
        .iter()
        .map(|form| (form.as_str(), strsim::jaro_winkler(search, form)))
        .filter(|(_, similarity)| *similarity >= FUZZY_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut kept: HashSet<&str> = HashSet::new();
    for (form, _) in &scored {
        if kept.len() >= FUZZY_LIMIT {
            break;
        }
        kept.insert(*form);
    }

    candidates
        .iter()
        .zip(&stripped)
        .filter(|(_, form)| kept.contains(form.as_str()))
        .map(|(original, _)| original.clone())
        .collect()
}

/// Pick the best candidate for a search term: the assistant tier first when
/// enabled (its transport failures and non-answers fall through), then
/// closest-by-edit-distance. The winning sub-component records its own
/// counter. Empty candidate sets yield `None`; callers filter first.
pub async fn find_best_match(
    provider: &dyn CompletionProvider,
    search: &str,
    name: &str,
    candidates: &[String],
    config: &ScrapeConfig,
    stats: &RunStats,
) -> Option<(String, MatchSource)> {
    if candidates.is_empty() {
        return None;
    }

    if config.ai {
        if let Some(best) =
            assistant::assistant_match(provider, search, name, candidates, config, stats).await
        {
            return Some((best, MatchSource::Assistant));
        }
    }

    let best = closest_match(search, candidates)?;
    log::info!("Partial match for \"{name}\" (searched: \"{search}\"): \"{best}\"");
    stats.record_partial();
    Some((best, MatchSource::EditDistance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScrapeResult;
    use async_trait::async_trait;

    struct NeverCalled;

    #[async_trait]
    impl CompletionProvider for NeverCalled {
        async fn complete(&self, _prompt: &str, _model: &str) -> ScrapeResult<String> {
            panic!("assistant must not be consulted");
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_closest_match_ignores_annotations() {
        let candidates = names(&["Metroid (USA).png", "Super Metroid (USA).png"]);
        assert_eq!(
            closest_match("Super Metroid", &candidates),
            Some("Super Metroid (USA).png".to_string())
        );
    }

    #[test]
    fn test_closest_match_tie_is_first_and_stable() {
        let candidates = names(&["AB.png", "AC.png"]);
        assert_eq!(closest_match("A", &candidates), Some("AB.png".to_string()));
    }

    #[test]
    fn test_closest_match_empty_input() {
        assert_eq!(closest_match("anything", &[]), None);
    }

    #[test]
    fn test_fuzzy_filter_keeps_similar_drops_distant() {
        let candidates = names(&["Zelda (USA).png", "Q*bert.png"]);
        let matches = fuzzy_filter("Zelda", &candidates);
        assert_eq!(matches, names(&["Zelda (USA).png"]));
    }

    #[test]
    fn test_fuzzy_filter_reexpands_duplicate_forms_in_order() {
        // Both strip to "Zelda .png": one kept form, two originals.
        let candidates = names(&["Zelda (USA).png", "Zelda (Europe).png", "Q*bert.png"]);
        let matches = fuzzy_filter("Zelda", &candidates);
        assert_eq!(
            matches,
            names(&["Zelda (USA).png", "Zelda (Europe).png"])
        );
    }

    #[test]
    fn test_fuzzy_filter_caps_distinct_forms() {
        let candidates: Vec<String> =
            (1..=30).map(|i| format!("Zelda {i:02}.png")).collect();
        let matches = fuzzy_filter("Zelda", &candidates);

        assert_eq!(matches.len(), FUZZY_LIMIT);
        assert!(matches.contains(&"Zelda 01.png".to_string()));
        assert!(!matches.contains(&"Zelda 26.png".to_string()));
    }

    #[test]
    fn test_fuzzy_filter_empty_result_not_error() {
        let candidates = names(&["Completely Unrelated.png"]);
        assert!(fuzzy_filter("Zelda", &candidates).is_empty());
    }

    #[tokio::test]
    async fn test_find_best_match_empty_candidates() {
        let stats = RunStats::default();
        let config = ScrapeConfig::default();
        let result =
            find_best_match(&NeverCalled, "Zelda", "Zelda", &[], &config, &stats).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_best_match_without_ai_uses_edit_distance() {
        let stats = RunStats::default();
        let config = ScrapeConfig::default();
        let candidates = names(&["Zelda (USA).png"]);

        let (best, source) =
            find_best_match(&NeverCalled, "Zelda", "Zelda", &candidates, &config, &stats)
                .await
                .expect("match");

        assert_eq!(best, "Zelda (USA).png");
        assert_eq!(source, MatchSource::EditDistance);
        assert_eq!(stats.snapshot().partial, 1);
    }
}
