//! PDF rasterization via pdftoppm
//!
//! Renders every page of a PDF to PNG with `pdftoppm` (poppler-utils).
//! Images land in a `<stem>_pages/` directory beside the source document so
//! the result JSON can reference them after the request completes. The
//! directory is recreated on every run; re-uploads overwrite cleanly.

use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;

use super::{ExtractError, Rasterizer};

pub struct PdftoppmRasterizer {
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Check that pdftoppm is installed.
    pub fn is_available() -> bool {
        Command::new("pdftoppm").arg("-v").output().is_ok()
    }
}

#[async_trait]
impl Rasterizer for PdftoppmRasterizer {
    async fn rasterize(&self, pdf_path: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let path = pdf_path.to_path_buf();
        let dpi = self.dpi;

        tokio::task::spawn_blocking(move || {
            if !Self::is_available() {
                return Err(ExtractError::RasterUnavailable(
                    "pdftoppm not found; install poppler-utils".to_string(),
                ));
            }

            let pages_dir = pages_dir_for(&path);
            if pages_dir.exists() {
                std::fs::remove_dir_all(&pages_dir)?;
            }
            std::fs::create_dir_all(&pages_dir)?;

            let output = Command::new("pdftoppm")
                .arg("-png")
                .arg("-r")
                .arg(dpi.to_string())
                .arg(&path)
                .arg(pages_dir.join("page"))
                .output()
                .map_err(|e| ExtractError::RasterError(format!("Failed to run pdftoppm: {}", e)))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(ExtractError::RasterError(format!(
                    "pdftoppm failed: {}",
                    stderr
                )));
            }

            // pdftoppm zero-pads page indices, so a path sort is page order
            let mut images: Vec<PathBuf> = std::fs::read_dir(&pages_dir)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
                .collect();
            images.sort();

            if images.is_empty() {
                return Err(ExtractError::RasterError(
                    "pdftoppm produced no images".to_string(),
                ));
            }

            Ok(images)
        })
        .await
        .map_err(|e| ExtractError::RasterError(format!("Task join error: {}", e)))?
    }
}

/// Directory holding the rendered page images for a document.
fn pages_dir_for(pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    pdf_path.with_file_name(format!("{}_pages", stem))
}
