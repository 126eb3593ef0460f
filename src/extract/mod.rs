//! Extraction seams
//!
//! The processor talks to its external collaborators through these traits:
//! [`TextExtractor`] pulls embedded digital text out of a PDF, and
//! [`Rasterizer`] renders PDF pages to images for OCR. Production
//! implementations live in the submodules; tests swap in mocks.

mod raster;
mod text;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use raster::PdftoppmRasterizer;
pub use text::LopdfTextExtractor;

/// Errors from digital text extraction and rasterization.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to load PDF: {0}")]
    LoadError(String),

    #[error("Rasterizer failed: {0}")]
    RasterError(String),

    #[error("Rasterizer not available: {0}")]
    RasterUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts per-page embedded text from a PDF.
///
/// Returns one string per page in document order. Pages without embedded
/// text yield an empty string; a document whose every page is empty is a
/// scanned PDF.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_pages(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Renders each page of a PDF to an image file.
///
/// Returns the generated image paths, one per page in document order.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<PathBuf>, ExtractError>;
}
