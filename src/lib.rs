//! Pagemill Server
//!
//! A single-endpoint document ingestion service: clients upload a PDF or
//! image, the service extracts embedded digital text or rasterizes and OCRs
//! the pages, and a page-structured JSON result is persisted and returned.

pub mod config;
pub mod error;
pub mod exporter;
pub mod extract;
pub mod model;
pub mod ocr;
pub mod processor;
pub mod routes;
pub mod state;
