//! Configuration management for Pagemill Server

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Filesystem layout: uploads land in `dataset_dir`, result JSON in
/// `output_dir`. Both are created at start-up if absent.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub dataset_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language code (e.g. "eng")
    pub language: String,
    /// Rasterization resolution for scanned PDFs
    pub dpi: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                dataset_dir: PathBuf::from("data"),
                output_dir: PathBuf::from("output"),
            },
            ocr: OcrConfig {
                language: "eng".to_string(),
                dpi: 300,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            storage: StorageConfig {
                dataset_dir: env::var("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.dataset_dir),
                output_dir: env::var("OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.output_dir),
            },
            ocr: OcrConfig {
                language: env::var("OCR_LANG").unwrap_or(defaults.ocr.language),
                dpi: env::var("OCR_DPI")
                    .ok()
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(defaults.ocr.dpi),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directories() {
        let config = Config::default();
        assert_eq!(config.storage.dataset_dir, PathBuf::from("data"));
        assert_eq!(config.storage.output_dir, PathBuf::from("output"));
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.dpi, 300);
    }
}
