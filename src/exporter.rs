//! Result writer
//!
//! Persists the processed page list as a JSON artifact. The bytes written
//! here are the same `serde_json` serialization the HTTP response embeds in
//! its `results` field, so artifact and response stay byte-equivalent.

use std::path::Path;

use crate::model::Page;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize `pages` and write them to `output_path`, overwriting any
/// previous artifact.
pub async fn save_results(pages: &[Page], output_path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_vec(pages)?;
    tokio::fs::write(output_path, json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    #[tokio::test]
    async fn written_artifact_matches_serialization() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");

        let pages = vec![Page {
            page: 1,
            file: "data/report.pdf".to_string(),
            blocks: vec![Block::digital("Hello")],
        }];

        save_results(&pages, &out).await.unwrap();

        let written = std::fs::read(&out).unwrap();
        assert_eq!(written, serde_json::to_vec(&pages).unwrap());
    }

    #[tokio::test]
    async fn rewriting_overwrites_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");

        let first = vec![Page {
            page: 1,
            file: "a.pdf".to_string(),
            blocks: vec![Block::digital("old")],
        }];
        let second = vec![Page {
            page: 1,
            file: "a.pdf".to_string(),
            blocks: vec![Block::digital("new")],
        }];

        save_results(&first, &out).await.unwrap();
        save_results(&second, &out).await.unwrap();

        let pages: Vec<Page> = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(pages[0].blocks[0].text, "new");
    }
}
