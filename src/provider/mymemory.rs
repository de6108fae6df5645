//! MyMemory translation-memory client.
//! One GET per fetch, parameterized by phrase and language pair.
//! No retry, no caching; connection pooling via reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ProviderError, RawCandidate, TranslationProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.mymemory.translated.net/get";

pub struct MyMemoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl MyMemoryClient {
    /// Create a client against the default endpoint, honoring the
    /// `MYMEMORY_BASE_URL` environment override.
    pub fn new() -> Result<Self, ProviderError> {
        let base_url =
            std::env::var("MYMEMORY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

/// Response envelope; only the matches array matters to the pipeline.
#[derive(Debug, Deserialize)]
struct MatchesBody {
    #[serde(default)]
    matches: Vec<RawCandidate>,
}

#[async_trait]
impl TranslationProvider for MyMemoryClient {
    async fn fetch(
        &self,
        source_lang: &str,
        target_lang: &str,
        phrase: &str,
    ) -> Result<Vec<RawCandidate>, ProviderError> {
        let langpair = format!("{source_lang}|{target_lang}");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", phrase), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let body: MatchesBody = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        if body.matches.is_empty() {
            // Provider answered cleanly but has nothing for this pair/phrase.
            warn!(langpair = %langpair, "provider_returned_no_matches");
            return Err(ProviderError::NoMatches);
        }

        debug!(langpair = %langpair, count = body.matches.len(), "provider_matches_received");
        Ok(body.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_body_tolerates_absent_matches_key() {
        let body: MatchesBody = serde_json::from_str(r#"{"responseStatus": 200}"#).unwrap();
        assert!(body.matches.is_empty());
    }

    #[test]
    fn matches_body_parses_wire_shape() {
        let body: MatchesBody = serde_json::from_str(
            r#"{
                "responseStatus": 200,
                "matches": [
                    {"translation": "gatto", "match": 1.0, "quality": "74",
                     "created-by": "MateCat", "usage-count": 5, "penalty": 0},
                    {"translation": "micio"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.matches.len(), 2);
        assert_eq!(body.matches[1], RawCandidate::bare("micio"));
    }
}
