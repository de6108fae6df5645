//! Ranking engine: score every raw candidate, collapse duplicates,
//! order best-first. Presentation caps/filters are the caller's business;
//! the engine always returns the complete deduplicated ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::provider::RawCandidate;
use crate::scoring;

/// A raw candidate paired with its computed score in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: RawCandidate,
    pub score: f64,
}

/// Ordered ranking, descending by score. Ties keep provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    entries: Vec<ScoredCandidate>,
}

impl RankedResult {
    pub fn entries(&self) -> &[ScoredCandidate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Presentation-side helper: the best `n` entries. Not part of the
    /// ranking contract itself.
    pub fn top(&self, n: usize) -> &[ScoredCandidate] {
        &self.entries[..self.entries.len().min(n)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// The engine received an empty candidate batch. Guards against a
    /// provider handing over an empty matches array without signaling it.
    NoCandidates,
}

impl std::fmt::Display for RankError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankError::NoCandidates => write!(f, "no candidates to rank"),
        }
    }
}

impl std::error::Error for RankError {}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Rank a raw candidate batch: score, dedupe by normalized translation
/// text keeping the higher-scoring entry, then stable-sort descending.
pub fn rank(candidates: Vec<RawCandidate>) -> Result<RankedResult, RankError> {
    if candidates.is_empty() {
        return Err(RankError::NoCandidates);
    }

    // Dedupe in first-seen order; a later duplicate replaces the kept
    // entry in place only when it scores strictly higher.
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ScoredCandidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let score = scoring::score(&candidate);
        let key = normalize(&candidate.translation);
        let scored = ScoredCandidate { candidate, score };
        match index_of.get(&key) {
            Some(&i) => {
                if scored.score > kept[i].score {
                    kept[i] = scored;
                }
            }
            None => {
                index_of.insert(key, kept.len());
                kept.push(scored);
            }
        }
    }

    // Vec::sort_by is stable, so exact ties keep insertion order.
    kept.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(RankedResult { entries: kept })
}
