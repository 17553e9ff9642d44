//! Keyword extraction over a produced summary.

use crate::keywords::{KeywordError, KeywordModel, StopWords};

/// Default number of keywords kept per summary.
pub const DEFAULT_TOP_N: usize = 8;

/// Return up to `top_n` keywords of `text`, most relevant first.
///
/// Blank text short-circuits to an empty list without consulting the model. Scores are
/// dropped; only the ranking order survives.
pub async fn extract_keywords(
    model: &dyn KeywordModel,
    text: &str,
    top_n: usize,
) -> Result<Vec<String>, KeywordError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let ranked = model.rank_keywords(text, top_n, StopWords::English).await?;

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|ranked| ranked.keyword)
        .collect())
}
