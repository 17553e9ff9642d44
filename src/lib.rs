#![deny(missing_docs)]

//! Core library for the document summarizer service.

/// HTTP routing and upload handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// PDF and image text extraction.
pub mod extraction;
/// Keyword ranking models.
pub mod keywords;
/// Structured logging and tracing setup.
pub mod logging;
/// Processing counters.
pub mod metrics;
/// Summarization pipeline utilities.
pub mod processing;
/// Summarization provider abstraction and adapters.
pub mod summarization;
/// Upload validation and storage.
pub mod upload;
