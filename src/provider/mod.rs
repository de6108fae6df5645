//! Translation provider boundary.
//! Wire types for the bilingual-memory service, the provider trait,
//! and the fetch error taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub mod mymemory;

pub use mymemory::MyMemoryClient;

/// One raw match as returned by the provider.
/// Loose wire fields are resolved to fixed defaults at parse time so the
/// scorer never has to null-guard. Immutable once received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCandidate {
    pub translation: String,
    /// Provider confidence, 0.0–1.0.
    #[serde(rename = "match", default, deserialize_with = "lenient_f64")]
    pub match_score: f64,
    /// Provider quality, 0–100. Arrives as string or number on the wire.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quality: f64,
    /// Provenance tag (sub-corpus or engine that produced the match).
    #[serde(rename = "created-by", default)]
    pub created_by: Option<String>,
    #[serde(rename = "usage-count", default, deserialize_with = "lenient_u64")]
    pub usage_count: u64,
    /// Provider-side penalty, 0.0–1.0.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub penalty: f64,
}

impl RawCandidate {
    /// Candidate with only translation text set, everything else defaulted.
    pub fn bare(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            match_score: 0.0,
            quality: 0.0,
            created_by: None,
            usage_count: 0,
            penalty: 0.0,
        }
    }
}

/// Accepts numbers, numeric strings, or null; anything else becomes 0.
fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u64<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Fetch failure taxonomy. `NoMatches` is logically distinct from transport
/// failure for diagnostics even though the user-visible treatment is the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Network/transport failure reaching the remote service.
    Unavailable(String),
    /// Provider responded but returned zero matches.
    NoMatches,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Unavailable(msg) => write!(f, "provider unavailable: {msg}"),
            ProviderError::NoMatches => write!(f, "no translations found"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Provider abstraction: one outbound request per call, no retry, no caching.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn fetch(
        &self,
        source_lang: &str,
        target_lang: &str,
        phrase: &str,
    ) -> Result<Vec<RawCandidate>, ProviderError>;
}

/// Scripted provider for exercising the conversation flow without network.
#[derive(Debug, Clone)]
pub enum MockScript {
    Respond(Vec<RawCandidate>),
    NoMatches,
    Unavailable,
}

pub struct MockProvider {
    script: MockScript,
}

impl MockProvider {
    pub fn new(script: MockScript) -> Self {
        Self { script }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn fetch(
        &self,
        _source_lang: &str,
        _target_lang: &str,
        _phrase: &str,
    ) -> Result<Vec<RawCandidate>, ProviderError> {
        match &self.script {
            MockScript::Respond(candidates) => Ok(candidates.clone()),
            MockScript::NoMatches => Err(ProviderError::NoMatches),
            MockScript::Unavailable => Err(ProviderError::Unavailable("scripted outage".into())),
        }
    }
}
