//! Keyword ranking models.
//!
//! A [`KeywordModel`] returns `(keyword, score)` pairs ordered by descending relevance. The
//! pipeline only keeps the keyword strings; see `processing::keywords`.

mod stop_words;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by keyword ranking models.
#[derive(Debug, Error)]
pub enum KeywordError {
    /// The model could not rank the supplied text.
    #[error("Failed to extract keywords: {0}")]
    ExtractionFailed(String),
}

/// Named stop-word set excluded from keyword candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopWords {
    /// Common English function words.
    #[default]
    English,
}

impl StopWords {
    /// Name understood by external ranking services.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
        }
    }

    fn contains(self, word: &str) -> bool {
        match self {
            Self::English => stop_words::ENGLISH.binary_search(&word).is_ok(),
        }
    }
}

/// A keyword together with the relevance score assigned by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedKeyword {
    /// Candidate keyword.
    pub keyword: String,
    /// Relevance score; higher is more relevant.
    pub score: f32,
}

/// Interface implemented by keyword ranking backends.
#[async_trait]
pub trait KeywordModel: Send + Sync {
    /// Rank up to `top_n` keywords of `text`, most relevant first.
    async fn rank_keywords(
        &self,
        text: &str,
        top_n: usize,
        stop_words: StopWords,
    ) -> Result<Vec<RankedKeyword>, KeywordError>;
}

/// Frequency-based keyword ranker running in process.
///
/// Candidates are lower-cased runs of at least two word characters. Each candidate is scored
/// by its share of all candidate occurrences; ties keep the order of first appearance.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticalKeywordModel;

impl StatisticalKeywordModel {
    /// Construct the ranker.
    pub const fn new() -> Self {
        Self
    }

    fn rank(text: &str, top_n: usize, stop_words: StopWords) -> Vec<RankedKeyword> {
        // (count, first position) per candidate
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut total = 0usize;

        let candidates = text
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .map(str::to_lowercase)
            .filter(|token| !stop_words.contains(token));

        for (position, candidate) in candidates.enumerate() {
            total += 1;
            counts.entry(candidate).or_insert((0, position)).0 += 1;
        }

        if total == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(keyword, (count, first))| (keyword, count, first))
            .collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1).then(left.2.cmp(&right.2)));

        ranked
            .into_iter()
            .take(top_n)
            .map(|(keyword, count, _)| RankedKeyword {
                keyword,
                score: count as f32 / total as f32,
            })
            .collect()
    }
}

#[async_trait]
impl KeywordModel for StatisticalKeywordModel {
    async fn rank_keywords(
        &self,
        text: &str,
        top_n: usize,
        stop_words: StopWords,
    ) -> Result<Vec<RankedKeyword>, KeywordError> {
        let ranked = Self::rank(text, top_n, stop_words);
        tracing::trace!(
            candidates = ranked.len(),
            top_n,
            stop_words = stop_words.as_str(),
            "Ranked keywords"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_word_list_is_sorted_for_binary_search() {
        let mut sorted = stop_words::ENGLISH.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, stop_words::ENGLISH);
    }

    #[tokio::test]
    async fn ranks_by_frequency_and_drops_stop_words() {
        let model = StatisticalKeywordModel::new();
        let ranked = model
            .rank_keywords(
                "The parser reads tokens. The parser emits a tree of tokens for the parser.",
                3,
                StopWords::English,
            )
            .await
            .expect("ranked");

        let keywords: Vec<&str> = ranked.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["parser", "tokens", "reads"]);
        assert!(ranked[0].score > ranked[1].score);
        assert!(!keywords.contains(&"the"));
    }

    #[tokio::test]
    async fn ignores_single_character_tokens() {
        let model = StatisticalKeywordModel::new();
        let ranked = model
            .rank_keywords("x y z", 8, StopWords::English)
            .await
            .expect("ranked");
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn lowercases_candidates() {
        let model = StatisticalKeywordModel::new();
        let ranked = model
            .rank_keywords("Rust rust RUST", 8, StopWords::English)
            .await
            .expect("ranked");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].keyword, "rust");
        assert!((ranked[0].score - 1.0).abs() < f32::EPSILON);
    }
}
