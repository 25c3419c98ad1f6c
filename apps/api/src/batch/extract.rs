//! Text extraction from uploaded candidate files.
//!
//! Format is chosen by file extension, with a magic-byte fallback when the
//! extension is unknown. Extraction is CPU-bound and runs on a blocking
//! thread, never on the async runtime.

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use pdf_extract::extract_text_from_mem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0}")]
    Unsupported(String),
    #[error("file is not valid UTF-8 text")]
    InvalidUtf8,
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Extracts plain text from an uploaded file, normalized for scoring.
pub fn extract_text(file_name: &str, data: &[u8]) -> Result<String, ExtractError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    let raw = match extension.as_deref() {
        Some("txt") => decode_utf8(data)?,
        Some("pdf") => extract_pdf_text(data)?,
        Some("docx") => extract_docx_text(data)?,
        _ => detect_and_extract(file_name, data)?,
    };

    Ok(normalize_text(&raw))
}

fn detect_and_extract(file_name: &str, data: &[u8]) -> Result<String, ExtractError> {
    if looks_like_pdf(data) {
        return extract_pdf_text(data);
    }
    if looks_like_docx(data) {
        return extract_docx_text(data);
    }
    if std::str::from_utf8(data).is_ok() {
        return decode_utf8(data);
    }
    Err(ExtractError::Unsupported(file_name.to_string()))
}

fn decode_utf8(data: &[u8]) -> Result<String, ExtractError> {
    std::str::from_utf8(data)
        .map(|text| text.to_string())
        .map_err(|_| ExtractError::InvalidUtf8)
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let package = read_docx(data).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &package.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let text = paragraph_text(paragraph.as_ref());
            if !text.trim().is_empty() {
                paragraphs.push(text.trim().to_string());
            }
        }
    }
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for inner in &run.children {
                match inner {
                    RunChild::Text(text) => buffer.push_str(&text.text),
                    RunChild::Tab(_) => buffer.push(' '),
                    RunChild::Break(_) => buffer.push('\n'),
                    _ => {}
                }
            }
        }
    }
    buffer
}

fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

// DOCX files are zip archives.
fn looks_like_docx(data: &[u8]) -> bool {
    data.len() > 4 && data.starts_with(b"PK")
}

/// Strips nulls and BOM, converts line endings to `\n`, trims trailing
/// whitespace per line and surrounding whitespace overall.
fn normalize_text(text: &str) -> String {
    let mut normalized = text.replace('\u{0000}', "");
    normalized = normalized.trim_start_matches('\u{FEFF}').to_string();
    normalized = normalized.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<&str> = normalized.lines().map(|line| line.trim_end()).collect();
    lines.join("\n").trim().to_string()
}
