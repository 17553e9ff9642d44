//! Keyword highlighting for summary HTML.
//!
//! Matching is literal and case-sensitive with no word-boundary checks, so a keyword also
//! matches inside longer words. Neither keywords nor text are HTML-escaped.

use crate::config::HighlightMode;

const SPAN_OPEN: &str = "<span class='highlight'>";
const SPAN_CLOSE: &str = "</span>";

/// Wrap keyword occurrences in `text` using the requested strategy.
pub fn highlight(text: &str, keywords: &[String], mode: HighlightMode) -> String {
    match mode {
        HighlightMode::SinglePass => highlight_single_pass(text, keywords),
        HighlightMode::Sequential => highlight_sequential(text, keywords),
    }
}

fn wrap(keyword: &str) -> String {
    format!("{SPAN_OPEN}{keyword}{SPAN_CLOSE}")
}

/// Replace every occurrence of each keyword, one keyword at a time.
///
/// Each pass runs over the output of the previous one, so a later keyword can match text
/// inside markup inserted earlier (for instance `highlight` inside the class attribute) and
/// produce nested spans.
pub fn highlight_sequential(text: &str, keywords: &[String]) -> String {
    if keywords.is_empty() || text.is_empty() {
        return text.to_string();
    }
    keywords
        .iter()
        .fold(text.to_string(), |current, keyword| {
            current.replace(keyword.as_str(), &wrap(keyword))
        })
}

/// Wrap keyword occurrences in a single left-to-right scan.
///
/// At each position the longest keyword starting there wins; the scan then resumes after the
/// match. Inserted markup is never rescanned and empty keywords are ignored.
pub fn highlight_single_pass(text: &str, keywords: &[String]) -> String {
    if keywords.is_empty() || text.is_empty() {
        return text.to_string();
    }

    let mut candidates: Vec<&str> = keywords
        .iter()
        .map(String::as_str)
        .filter(|keyword| !keyword.is_empty())
        .collect();
    candidates.sort_by(|left, right| right.len().cmp(&left.len()).then_with(|| left.cmp(right)));
    candidates.dedup();

    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(current) = rest.chars().next() {
        match candidates.iter().find(|keyword| rest.starts_with(**keyword)) {
            Some(keyword) => {
                output.push_str(SPAN_OPEN);
                output.push_str(keyword);
                output.push_str(SPAN_CLOSE);
                rest = &rest[keyword.len()..];
            }
            None => {
                output.push(current);
                rest = &rest[current.len_utf8()..];
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn empty_inputs_are_returned_unchanged() {
        for mode in [HighlightMode::SinglePass, HighlightMode::Sequential] {
            assert_eq!(highlight("hello world", &[], mode), "hello world");
            assert_eq!(highlight("", &keywords(&["x"]), mode), "");
        }
    }

    #[test]
    fn matches_inside_longer_words() {
        let expected =
            "<span class='highlight'>cat</span> con<span class='highlight'>cat</span>enate";
        for mode in [HighlightMode::SinglePass, HighlightMode::Sequential] {
            assert_eq!(highlight("cat concatenate", &keywords(&["cat"]), mode), expected);
        }
    }

    #[test]
    fn sequential_rewraps_inserted_markup() {
        let highlighted = highlight_sequential("cat", &keywords(&["cat", "highlight"]));
        assert_eq!(
            highlighted,
            "<span class='<span class='highlight'>highlight</span>'>cat</span>"
        );
    }

    #[test]
    fn single_pass_never_touches_inserted_markup() {
        let highlighted = highlight_single_pass("cat", &keywords(&["cat", "highlight"]));
        assert_eq!(highlighted, "<span class='highlight'>cat</span>");
    }

    #[test]
    fn single_pass_prefers_longest_keyword() {
        let highlighted =
            highlight_single_pass("cat concatenate", &keywords(&["cat", "concatenate"]));
        assert_eq!(
            highlighted,
            "<span class='highlight'>cat</span> <span class='highlight'>concatenate</span>"
        );

        // sequential consumes the shorter keyword first and the longer one no longer matches
        let sequential =
            highlight_sequential("cat concatenate", &keywords(&["cat", "concatenate"]));
        assert_eq!(
            sequential,
            "<span class='highlight'>cat</span> con<span class='highlight'>cat</span>enate"
        );
    }

    #[test]
    fn matching_is_case_sensitive_and_unescaped() {
        let highlighted = highlight_single_pass("Rust & rust", &keywords(&["rust", "&"]));
        assert_eq!(
            highlighted,
            "Rust <span class='highlight'>&</span> <span class='highlight'>rust</span>"
        );
    }

    #[test]
    fn single_pass_handles_multibyte_text() {
        let highlighted = highlight_single_pass("naïve café", &keywords(&["café"]));
        assert_eq!(highlighted, "naïve <span class='highlight'>café</span>");
    }
}
