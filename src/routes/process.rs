//! Document processing endpoint
//!
//! POST /process accepts a multipart upload (field `file`), stores the bytes
//! under the dataset directory by original filename, runs the document
//! processor, and returns the page-structured result. Re-uploading the same
//! filename overwrites the stored file and its result JSON.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::model::Page;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProcessResponse {
    pub status: &'static str,
    pub file: String,
    pub output: String,
    pub results: Vec<Page>,
}

/// POST /process
pub async fn process_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>> {
    let (file_name, data) = read_file_field(&mut multipart).await?;

    let storage = &state.config().storage;
    let doc_path = storage.dataset_dir.join(&file_name);
    tokio::fs::write(&doc_path, &data).await?;

    let stem = Path::new(&file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.clone());
    let output_path = storage.output_dir.join(format!("{}.json", stem));

    tracing::info!(
        file = %file_name,
        size = data.len(),
        output = %output_path.display(),
        "Processing uploaded document"
    );

    let results = state.processor().process(&doc_path, &output_path).await?;

    Ok(Json(ProcessResponse {
        status: "success",
        file: file_name,
        output: output_path.display().to_string(),
        results,
    }))
}

/// Pull the `file` field out of the multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(sanitize_filename)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("file field has no filename".to_string()))?;
        let data = field.bytes().await?.to_vec();
        return Ok((file_name, data));
    }
    Err(AppError::BadRequest(
        "multipart body is missing a 'file' field".to_string(),
    ))
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
