use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::errors::AppError;

/// Anything shorter than this after trimming counts as a failed extraction.
const MIN_EXTRACTED_CHARS: usize = 10;

pub(crate) const EXTRACTION_FAILED: &str =
    "Could not extract text from the resume. Please check the file format.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    PlainText,
}

impl ResumeFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(ResumeFormat::Pdf),
            "docx" => Ok(ResumeFormat::Docx),
            "txt" => Ok(ResumeFormat::PlainText),
            "" => Err(AppError::InvalidInput(
                "Unsupported file format: file has no extension".to_string(),
            )),
            other => Err(AppError::InvalidInput(format!(
                "Unsupported file format: .{other}"
            ))),
        }
    }
}

/// Converts an uploaded resume to plain text. CPU-bound for PDF and DOCX:
/// call from `spawn_blocking`.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let text = match ResumeFormat::from_file_name(file_name)? {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            tracing::warn!("PDF extraction failed for {file_name}: {e}");
            AppError::ExtractionFailure(EXTRACTION_FAILED.to_string())
        })?,
        ResumeFormat::Docx => docx_text(bytes).map_err(|e| {
            tracing::warn!("DOCX extraction failed for {file_name}: {e}");
            AppError::ExtractionFailure(EXTRACTION_FAILED.to_string())
        })?,
        ResumeFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim();
    if text.chars().count() < MIN_EXTRACTED_CHARS {
        return Err(AppError::ExtractionFailure(EXTRACTION_FAILED.to_string()));
    }
    Ok(text.to_string())
}

/// Pulls the run text out of `word/document.xml`, one line per paragraph.
fn docx_text(bytes: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}
