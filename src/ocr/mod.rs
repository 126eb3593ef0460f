//! OCR Module
//!
//! Recognizes text blocks in page images. The [`BlockExtractor`] trait is
//! the seam the processor calls through; [`TesseractEngine`] is the
//! production backend, shelling out to a local Tesseract install.

mod tesseract;

use std::path::Path;

use async_trait::async_trait;

pub use tesseract::TesseractEngine;

use crate::model::Block;

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),
}

/// Extracts text blocks (text, language, confidence, bounding box) from an
/// image file.
#[async_trait]
pub trait BlockExtractor: Send + Sync {
    async fn extract_blocks(&self, image_path: &Path) -> Result<Vec<Block>, OcrError>;
}
