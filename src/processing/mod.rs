//! Text processing pipeline: length tiers, chunking, summarization, keywords, highlighting.

pub mod chunking;
pub mod highlight;
pub mod keywords;
pub mod length;
mod service;
pub mod types;

pub use length::{LengthTier, TokenBounds};
pub use service::{
    Collaborators, PipelineSettings, ProcessedUpload, ProcessingApi, ProcessingService, Summary,
    Upload, generate_summary,
};
pub use types::{ChunkingError, DocumentAnalysis, ProcessingError, SummarizationError};
