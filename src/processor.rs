//! Document processor
//!
//! Orchestrates the extraction collaborators: decides whether a PDF carries
//! embedded digital text or must be rasterized and OCR'd, assembles the
//! per-page block structure, and persists the result before returning it.

use std::path::Path;
use std::sync::Arc;

use crate::exporter::{self, ExportError};
use crate::extract::{ExtractError, Rasterizer, TextExtractor};
use crate::model::{Block, Page};
use crate::ocr::{BlockExtractor, OcrError};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Orchestrates text extraction, rasterization, and OCR for one document.
pub struct DocumentProcessor {
    text_extractor: Arc<dyn TextExtractor>,
    rasterizer: Arc<dyn Rasterizer>,
    block_extractor: Arc<dyn BlockExtractor>,
}

impl DocumentProcessor {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        rasterizer: Arc<dyn Rasterizer>,
        block_extractor: Arc<dyn BlockExtractor>,
    ) -> Self {
        Self {
            text_extractor,
            rasterizer,
            block_extractor,
        }
    }

    /// Process a document and persist the result JSON at `output_path`.
    ///
    /// PDFs with embedded text on any page take the digital path: one page
    /// per extractor page, a single full-text block each. PDFs with no
    /// embedded text are rasterized and OCR'd page by page. Non-PDF inputs
    /// are OCR'd directly as a single page.
    pub async fn process(
        &self,
        doc_path: &Path,
        output_path: &Path,
    ) -> Result<Vec<Page>, ProcessError> {
        let is_pdf = doc_path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        let pages = if is_pdf {
            self.process_pdf(doc_path).await?
        } else {
            self.process_image(doc_path).await?
        };

        exporter::save_results(&pages, output_path).await?;
        Ok(pages)
    }

    async fn process_pdf(&self, doc_path: &Path) -> Result<Vec<Page>, ProcessError> {
        let digital_pages = self.text_extractor.extract_pages(doc_path).await?;

        let with_text = digital_pages
            .iter()
            .filter(|t| !t.trim().is_empty())
            .count();

        if with_text > 0 {
            tracing::info!(path = %doc_path.display(), "Digital PDF detected, extracting text directly");
            if with_text < digital_pages.len() {
                tracing::warn!(
                    path = %doc_path.display(),
                    empty_pages = digital_pages.len() - with_text,
                    "Document mixes digital and textless pages; skipping OCR for the textless ones"
                );
            }

            let pages = digital_pages
                .into_iter()
                .enumerate()
                .map(|(idx, text)| Page {
                    page: idx as u32 + 1,
                    file: doc_path.display().to_string(),
                    blocks: vec![Block::digital(text)],
                })
                .collect();
            return Ok(pages);
        }

        tracing::info!(path = %doc_path.display(), "Scanned PDF detected, running OCR");
        let images = self.rasterizer.rasterize(doc_path).await?;

        let mut pages = Vec::with_capacity(images.len());
        for (idx, image) in images.iter().enumerate() {
            let blocks = self.block_extractor.extract_blocks(image).await?;
            pages.push(Page {
                page: idx as u32 + 1,
                file: image.display().to_string(),
                blocks,
            });
        }
        Ok(pages)
    }

    async fn process_image(&self, doc_path: &Path) -> Result<Vec<Page>, ProcessError> {
        let blocks = self.block_extractor.extract_blocks(doc_path).await?;
        Ok(vec![Page {
            page: 1,
            file: doc_path.display().to_string(),
            blocks,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use async_trait::async_trait;

    struct FakeText(Vec<String>);

    #[async_trait]
    impl TextExtractor for FakeText {
        async fn extract_pages(&self, _pdf_path: &Path) -> Result<Vec<String>, ExtractError> {
            Ok(self.0.clone())
        }
    }

    struct FakeRaster(Vec<PathBuf>);

    #[async_trait]
    impl Rasterizer for FakeRaster {
        async fn rasterize(&self, _pdf_path: &Path) -> Result<Vec<PathBuf>, ExtractError> {
            Ok(self.0.clone())
        }
    }

    struct FakeBlocks(Vec<Block>);

    #[async_trait]
    impl BlockExtractor for FakeBlocks {
        async fn extract_blocks(&self, _image_path: &Path) -> Result<Vec<Block>, OcrError> {
            Ok(self.0.clone())
        }
    }

    fn ocr_block(text: &str) -> Block {
        Block {
            text: text.to_string(),
            lang: "en".to_string(),
            confidence: 87.5,
            bbox: Some([10.0, 20.0, 100.0, 30.0]),
        }
    }

    fn processor(
        texts: Vec<&str>,
        images: Vec<&str>,
        blocks: Vec<Block>,
    ) -> DocumentProcessor {
        DocumentProcessor::new(
            Arc::new(FakeText(texts.into_iter().map(String::from).collect())),
            Arc::new(FakeRaster(images.into_iter().map(PathBuf::from).collect())),
            Arc::new(FakeBlocks(blocks)),
        )
    }

    #[tokio::test]
    async fn digital_pdf_yields_one_full_text_block_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let proc = processor(vec!["Hello", "World"], vec![], vec![]);

        let pages = proc.process(Path::new("data/report.pdf"), &out).await.unwrap();

        assert_eq!(pages.len(), 2);
        for (idx, page) in pages.iter().enumerate() {
            assert_eq!(page.page, idx as u32 + 1);
            assert_eq!(page.file, "data/report.pdf");
            assert_eq!(page.blocks.len(), 1);
            assert_eq!(page.blocks[0].confidence, 100.0);
            assert!(page.blocks[0].bbox.is_none());
        }
        assert_eq!(pages[0].blocks[0].text, "Hello");
        assert_eq!(pages[1].blocks[0].text, "World");
    }

    #[tokio::test]
    async fn scanned_pdf_goes_through_ocr_per_image() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scan.json");
        let proc = processor(
            vec!["", "  \n"],
            vec!["data/scan_pages/page-1.png", "data/scan_pages/page-2.png"],
            vec![ocr_block("line one"), ocr_block("line two")],
        );

        let pages = proc.process(Path::new("data/scan.pdf"), &out).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page, 1);
        assert_eq!(pages[0].file, "data/scan_pages/page-1.png");
        assert_eq!(pages[1].page, 2);
        assert_eq!(pages[1].file, "data/scan_pages/page-2.png");
        // OCR output preserved verbatim
        assert_eq!(pages[0].blocks, vec![ocr_block("line one"), ocr_block("line two")]);
    }

    #[tokio::test]
    async fn mixed_document_is_treated_as_digital() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("mixed.json");
        let proc = processor(
            vec!["Some text", ""],
            vec!["unused.png"],
            vec![ocr_block("should not appear")],
        );

        let pages = proc.process(Path::new("mixed.pdf"), &out).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].blocks[0].text, "Some text");
        assert_eq!(pages[1].blocks[0].text, "");
        assert_eq!(pages[1].blocks[0].confidence, 100.0);
    }

    #[tokio::test]
    async fn non_pdf_input_is_a_single_page() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("photo.json");
        let proc = processor(vec![], vec![], vec![ocr_block("sign text")]);

        let pages = proc.process(Path::new("data/photo.png"), &out).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page, 1);
        assert_eq!(pages[0].file, "data/photo.png");
        assert_eq!(pages[0].blocks[0].text, "sign text");
    }

    #[tokio::test]
    async fn result_artifact_is_written_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let proc = processor(vec!["Hello"], vec![], vec![]);

        let pages = proc.process(Path::new("report.pdf"), &out).await.unwrap();

        let written = std::fs::read(&out).unwrap();
        assert_eq!(written, serde_json::to_vec(&pages).unwrap());
    }

    #[tokio::test]
    async fn page_numbers_are_contiguous_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("big.json");
        let proc = processor(vec!["a", "b", "c", "d"], vec![], vec![]);

        let pages = proc.process(Path::new("big.pdf"), &out).await.unwrap();

        let numbers: Vec<u32> = pages.iter().map(|p| p.page).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
