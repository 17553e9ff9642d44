use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct PipelineMetrics {
    documents_processed: AtomicU64,
    chunks_summarized: AtomicU64,
    failed_summaries: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document whose text was extracted.
    pub fn record_document(&self) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the number of chunks sent to the summarizer for one document.
    pub fn record_chunks(&self, chunk_count: u64) {
        self.chunks_summarized
            .fetch_add(chunk_count, Ordering::Relaxed);
    }

    /// Record a summary that could not be produced because the text was empty.
    pub fn record_failed_summary(&self) {
        self.failed_summaries.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            failed_summaries: self.failed_summaries.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of uploaded documents whose text was extracted since startup.
    pub documents_processed: u64,
    /// Total chunk count passed to the summarizer.
    pub chunks_summarized: u64,
    /// Summaries rejected because the extracted text was blank.
    pub failed_summaries: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_documents_and_chunks() {
        let metrics = PipelineMetrics::new();
        metrics.record_document();
        metrics.record_chunks(2);
        metrics.record_document();
        metrics.record_chunks(3);
        metrics.record_failed_summary();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_processed, 2);
        assert_eq!(snapshot.chunks_summarized, 5);
        assert_eq!(snapshot.failed_summaries, 1);
    }

    #[test]
    fn snapshot_starts_empty() {
        let metrics = PipelineMetrics::new();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_processed, 0);
        assert_eq!(snapshot.chunks_summarized, 0);
        assert_eq!(snapshot.failed_summaries, 0);
    }
}
