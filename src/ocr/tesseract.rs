//! Tesseract OCR engine
//!
//! Runs the `tesseract` binary with TSV output and folds word-level rows
//! into line-level blocks: text joined with spaces, confidence averaged over
//! the words, bounding box as the union of the word boxes.

use std::path::Path;
use std::process::Command;

use async_trait::async_trait;

use super::{BlockExtractor, OcrError};
use crate::model::Block;

pub struct TesseractEngine {
    /// Tesseract language code, e.g. "eng"
    language: String,
}

impl TesseractEngine {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Check that tesseract is installed.
    pub fn is_available() -> bool {
        Command::new("tesseract").arg("--version").output().is_ok()
    }

    /// Language tag reported on blocks ("eng" -> "en").
    fn lang_tag(&self) -> String {
        self.language.chars().take(2).collect()
    }
}

#[async_trait]
impl BlockExtractor for TesseractEngine {
    async fn extract_blocks(&self, image_path: &Path) -> Result<Vec<Block>, OcrError> {
        let path = image_path.to_path_buf();
        let lang = self.language.clone();
        let tag = self.lang_tag();

        tokio::task::spawn_blocking(move || {
            if !Self::is_available() {
                return Err(OcrError::EngineNotAvailable(
                    "tesseract not found; install tesseract-ocr".to_string(),
                ));
            }

            let output = Command::new("tesseract")
                .arg(&path)
                .arg("stdout")
                .arg("-l")
                .arg(&lang)
                .arg("--psm")
                .arg("3")
                .arg("tsv")
                .output()
                .map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(OcrError::ProcessingError(format!(
                    "Tesseract failed on {}: {}",
                    path.display(),
                    stderr
                )));
            }

            let tsv = String::from_utf8_lossy(&output.stdout);
            Ok(parse_tsv(&tsv, &tag))
        })
        .await
        .map_err(|e| OcrError::ProcessingError(format!("Task join error: {}", e)))?
    }
}

/// One word row from Tesseract's TSV output (level 5).
struct Word {
    line_key: (u32, u32, u32),
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    conf: f32,
    text: String,
}

fn parse_word(line: &str) -> Option<Word> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < 12 {
        return None;
    }

    // Only word rows carry text; structural rows have conf -1
    let level: u32 = cols[0].parse().ok()?;
    if level != 5 {
        return None;
    }
    let conf: f32 = cols[10].parse().ok()?;
    if conf < 0.0 {
        return None;
    }
    let text = cols[11].trim();
    if text.is_empty() {
        return None;
    }

    Some(Word {
        line_key: (
            cols[2].parse().ok()?,
            cols[3].parse().ok()?,
            cols[4].parse().ok()?,
        ),
        left: cols[6].parse().ok()?,
        top: cols[7].parse().ok()?,
        width: cols[8].parse().ok()?,
        height: cols[9].parse().ok()?,
        conf,
        text: text.to_string(),
    })
}

/// Fold TSV word rows into line-level blocks.
fn parse_tsv(tsv: &str, lang_tag: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut current_key = None;
    let mut words: Vec<Word> = Vec::new();

    let flush = |words: &mut Vec<Word>, blocks: &mut Vec<Block>| {
        if words.is_empty() {
            return;
        }
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let confidence = words.iter().map(|w| w.conf).sum::<f32>() / words.len() as f32;
        let x0 = words.iter().map(|w| w.left).fold(f32::INFINITY, f32::min);
        let y0 = words.iter().map(|w| w.top).fold(f32::INFINITY, f32::min);
        let x1 = words
            .iter()
            .map(|w| w.left + w.width)
            .fold(f32::NEG_INFINITY, f32::max);
        let y1 = words
            .iter()
            .map(|w| w.top + w.height)
            .fold(f32::NEG_INFINITY, f32::max);

        blocks.push(Block {
            text,
            lang: lang_tag.to_string(),
            confidence,
            bbox: Some([x0, y0, x1 - x0, y1 - y0]),
        });
        words.clear();
    };

    for line in tsv.lines().skip(1) {
        let Some(word) = parse_word(line) else {
            continue;
        };
        if current_key != Some(word.line_key) {
            flush(&mut words, &mut blocks);
            current_key = Some(word.line_key);
        }
        words.push(word);
    }
    flush(&mut words, &mut blocks);

    blocks
}
