//! The export-to-PDF boundary.

use async_trait::async_trait;
use quote_core::RenderedDocument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF compilation failed: {0}")]
    Compile(String),

    #[error("export task failed: {0}")]
    Task(String),
}

/// Turns a rendered quote into a PDF document.
///
/// The document is a snapshot taken when the export was requested; edits
/// made while the export runs only affect later exports.
#[async_trait]
pub trait PdfExporter: Send + Sync {
    async fn export(
        &self,
        document: &RenderedDocument,
    ) -> Result<Vec<u8>, ExportError>;
}
