//! Text extraction for uploaded documents.

use std::path::Path;

use super::RetrievalError;

/// Supported upload formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
    Markdown,
}

impl DocumentKind {
    /// Kind from the extension of `filename` (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Extracts plain text from an uploaded document.
///
/// PDF text goes through `pdf-extract`; text and markdown are decoded as UTF-8 (lossy).
/// Fails with `EmptyDocument` for an empty payload or when no text could be extracted.
pub fn load_document(bytes: &[u8], filename: &str) -> Result<String, RetrievalError> {
    let kind = DocumentKind::from_filename(filename)
        .ok_or_else(|| RetrievalError::UnsupportedDocument(filename.to_string()))?;
    if bytes.is_empty() {
        return Err(RetrievalError::EmptyDocument);
    }
    let text = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Text | DocumentKind::Markdown => String::from_utf8_lossy(bytes).into_owned(),
    };
    if text.trim().is_empty() {
        return Err(RetrievalError::EmptyDocument);
    }
    Ok(text)
}

/// `pdf-extract` panics on some malformed files; a panic is reported as an extraction error.
fn extract_pdf(bytes: &[u8]) -> Result<String, RetrievalError> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(RetrievalError::Extraction(e.to_string())),
        Err(_) => Err(RetrievalError::Extraction("malformed PDF".to_string())),
    }
}
