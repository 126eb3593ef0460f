//! Digital text extraction via lopdf
//!
//! Loads the PDF and runs `extract_text` page by page. Extraction failures
//! on individual pages are treated as empty pages rather than fatal errors,
//! since image-only pages routinely have no text content stream worth
//! parsing and would otherwise abort scanned-PDF detection.

use std::path::Path;

use async_trait::async_trait;
use lopdf::Document;

use super::{ExtractError, TextExtractor};

pub struct LopdfTextExtractor;

impl LopdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LopdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for LopdfTextExtractor {
    async fn extract_pages(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractError> {
        let path = pdf_path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let doc = Document::load(&path).map_err(|e| ExtractError::LoadError(e.to_string()))?;

            // get_pages is keyed by 1-based page number, iterated in order
            let mut pages = Vec::new();
            for (page_num, _object_id) in doc.get_pages() {
                let text = match doc.extract_text(&[page_num]) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::debug!(page = page_num, "No extractable text: {}", e);
                        String::new()
                    }
                };
                pages.push(text);
            }

            Ok(pages)
        })
        .await
        .map_err(|e| ExtractError::LoadError(format!("Task join error: {}", e)))?
    }
}
