// Screening: document ingestion, sequential batch runs and their HTTP handlers.
// Every document gets its own pipeline run and its own report.

pub mod batch;
pub mod handlers;
pub mod ingest;
