// src/resume/mod.rs
use anyhow::{Context, Result};
use std::path::Path;

pub mod generator;
pub mod llm;
pub mod schema;

pub use generator::generate_resume_yaml;
pub use llm::OpenAiClient;
pub use schema::{load_yaml_document, validate_resume_yaml, ValidationReport};

use crate::utils::get_file_extension;

/// Read the resume text from a `.pdf` (extracted) or plain-text file.
pub fn extract_resume_text(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    if get_file_extension(file_name).as_deref() == Some("pdf") {
        pdf_extract::extract_text(path)
            .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resume file: {}", path.display()))
    }
}
