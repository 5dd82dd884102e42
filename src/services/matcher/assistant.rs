//! AI-assisted disambiguation over a candidate set.
//!
//! The assistant only ever *selects* — every answer is validated against
//! the candidate list, and anything else (hallucinations, null answers,
//! transport failures) makes the tier yield so the deterministic matcher
//! can decide.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::services::config::ScrapeConfig;
use crate::services::stats::RunStats;
use crate::types::{ScrapeError, ScrapeResult};

/// Extra attempts allowed when the model answers outside the candidate set.
pub const ASSISTANT_RETRIES: usize = 2;

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Completion transport: one prompt in, the model's raw text answer out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, model: &str) -> ScrapeResult<String>;
}

/// Expected answer shape. Anything else counts as "no confident match".
#[derive(Debug, Deserialize)]
struct BestMatchAnswer {
    #[serde(rename = "bestMatch")]
    best_match: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Production provider against an Ollama-compatible `/api/generate`
/// endpoint. No request timeout: generation time varies wildly by model,
/// and callers own cancellation policy.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn complete(&self, prompt: &str, model: &str) -> ScrapeResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let payload = GenerateRequest {
            model,
            prompt,
            stream: false,
            format: "json",
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Transport(format!(
                "completion endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}

/// Disambiguation prompt enumerating every candidate verbatim.
fn build_prompt(name: &str, candidates: &[String], regions: &[String]) -> String {
    format!(
        r#"## Candidates
{candidates}

## Instructions
Find the best matching image for the ROM name "{name}" in the listed candidates.
If a direct match isn't available, use the closest match trying to translate the name in english.
For example, "Pokemon - Version Or (France) (SGB Enhanced)" should match "Pokemon - Gold Version (USA, Europe) (SGB Enhanced) (GB Compatible).png".
Game sequels MUST NOT match, "Sonic" is NOT the same as "Sonic 2".
When multiple regions are available, prefer the one that matches the region of the ROM if possible.
If the region is not available, use this order of preference: {regions}.
If no close match is found, return null.

## Output
Answer with JSON using the following format:
{{
  "bestMatch": "<best matching candidate>"
}}"#,
        candidates = candidates.join("\n"),
        regions = regions.join(", "),
    )
}

/// Ask the assistant to pick among candidates.
///
/// Answers outside the candidate set consume the retry budget (at most
/// [`ASSISTANT_RETRIES`] + 1 provider calls); transport failures, malformed
/// JSON and null answers end the tier immediately without retrying.
pub async fn assistant_match(
    provider: &dyn CompletionProvider,
    search: &str,
    name: &str,
    candidates: &[String],
    config: &ScrapeConfig,
    stats: &RunStats,
) -> Option<String> {
    let prompt = build_prompt(name, candidates, &config.regions);

    let mut tries_left = ASSISTANT_RETRIES;
    loop {
        let response = match provider.complete(&prompt, &config.ai_model).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Assistant call failed for \"{name}\": {e}");
                return None;
            }
        };

        let answer: BestMatchAnswer = match serde_json::from_str(&response) {
            Ok(answer) => answer,
            Err(e) => {
                log::debug!("Assistant answer for \"{name}\" is not valid JSON: {e}");
                return None;
            }
        };

        let Some(best_match) = answer.best_match.filter(|m| !m.is_empty()) else {
            log::debug!("Assistant found no match for \"{name}\" (searched: \"{search}\")");
            return None;
        };

        if !candidates.contains(&best_match) {
            log::debug!(
                "Assistant answered \"{best_match}\" for \"{name}\", which is not a candidate"
            );
            if tries_left == 0 {
                return None;
            }
            tries_left -= 1;
            log::debug!("Retrying assistant match for \"{name}\" (tries left: {tries_left})");
            continue;
        }

        log::info!("Assistant match for \"{name}\" (searched: \"{search}\"): \"{best_match}\"");
        stats.record_assistant();
        return Some(best_match);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Pops scripted responses front-to-back and counts calls.
    struct ScriptedProvider {
        responses: Mutex<Vec<ScrapeResult<String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<ScrapeResult<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _prompt: &str, _model: &str) -> ScrapeResult<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.responses
                .lock()
                .expect("lock scripted responses")
                .remove(0)
        }
    }

    fn answer(best_match: &str) -> ScrapeResult<String> {
        Ok(format!(r#"{{"bestMatch": "{best_match}"}}"#))
    }

    fn candidates() -> Vec<String> {
        vec![
            "Sonic The Hedgehog (USA).png".to_string(),
            "Sonic The Hedgehog 2 (Europe).png".to_string(),
        ]
    }

    fn ai_config() -> ScrapeConfig {
        ScrapeConfig {
            ai: true,
            ..ScrapeConfig::default()
        }
    }

    #[test]
    fn test_prompt_enumerates_candidates_and_regions() {
        let prompt = build_prompt(
            "Sonic The Hedgehog",
            &candidates(),
            &["Japan".to_string(), "USA".to_string()],
        );
        assert!(prompt.contains("Sonic The Hedgehog (USA).png"));
        assert!(prompt.contains("Sonic The Hedgehog 2 (Europe).png"));
        assert!(prompt.contains("order of preference: Japan, USA"));
        assert!(prompt.contains("\"bestMatch\""));
    }

    #[tokio::test]
    async fn test_valid_answer_accepted_and_counted() {
        let provider = ScriptedProvider::new(vec![answer("Sonic The Hedgehog (USA).png")]);
        let stats = RunStats::default();

        let best = assistant_match(
            &provider,
            "Sonic The Hedgehog",
            "Sonic The Hedgehog (Japan)",
            &candidates(),
            &ai_config(),
            &stats,
        )
        .await;

        assert_eq!(best, Some("Sonic The Hedgehog (USA).png".to_string()));
        assert_eq!(provider.calls(), 1);
        assert_eq!(stats.snapshot().assistant, 1);
    }

    #[tokio::test]
    async fn test_hallucinations_retry_then_succeed() {
        let provider = ScriptedProvider::new(vec![
            answer("Sonic 3.png"),
            answer("Sonic The Hedgehog 9.png"),
            answer("Sonic The Hedgehog 2 (Europe).png"),
        ]);
        let stats = RunStats::default();

        let best = assistant_match(
            &provider,
            "Sonic The Hedgehog 2",
            "Sonic The Hedgehog 2 (Japan)",
            &candidates(),
            &ai_config(),
            &stats,
        )
        .await;

        assert_eq!(best, Some("Sonic The Hedgehog 2 (Europe).png".to_string()));
        assert_eq!(provider.calls(), ASSISTANT_RETRIES + 1);
        assert_eq!(stats.snapshot().assistant, 1);
    }

    #[tokio::test]
    async fn test_retry_budget_is_bounded() {
        let provider = ScriptedProvider::new(vec![
            answer("nope 1.png"),
            answer("nope 2.png"),
            answer("nope 3.png"),
            answer("nope 4.png"),
        ]);
        let stats = RunStats::default();

        let best = assistant_match(
            &provider,
            "Sonic The Hedgehog",
            "Sonic The Hedgehog",
            &candidates(),
            &ai_config(),
            &stats,
        )
        .await;

        assert_eq!(best, None);
        assert_eq!(provider.calls(), ASSISTANT_RETRIES + 1);
        assert_eq!(stats.snapshot().assistant, 0);
    }

    #[tokio::test]
    async fn test_null_answer_ends_tier_without_retry() {
        let provider = ScriptedProvider::new(vec![Ok(r#"{"bestMatch": null}"#.to_string())]);
        let stats = RunStats::default();

        let best = assistant_match(
            &provider,
            "Sonic The Hedgehog",
            "Sonic The Hedgehog",
            &candidates(),
            &ai_config(),
            &stats,
        )
        .await;

        assert_eq!(best, None);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_ends_tier_without_retry() {
        let provider = ScriptedProvider::new(vec![Err(ScrapeError::Transport(
            "connection refused".to_string(),
        ))]);
        let stats = RunStats::default();

        let best = assistant_match(
            &provider,
            "Sonic The Hedgehog",
            "Sonic The Hedgehog",
            &candidates(),
            &ai_config(),
            &stats,
        )
        .await;

        assert_eq!(best, None);
        assert_eq!(provider.calls(), 1);
        assert_eq!(stats.snapshot().assistant, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_ends_tier_without_retry() {
        let provider = ScriptedProvider::new(vec![Ok("best match: Sonic".to_string())]);
        let stats = RunStats::default();

        let best = assistant_match(
            &provider,
            "Sonic The Hedgehog",
            "Sonic The Hedgehog",
            &candidates(),
            &ai_config(),
            &stats,
        )
        .await;

        assert_eq!(best, None);
        assert_eq!(provider.calls(), 1);
    }
}
