use std::path::Path;

use tracing::{debug, info};

use crate::errors::QuizError;

/// Default maximum document length accepted for summarization.
pub const DEFAULT_MAX_PAGES: usize = 5;

/// Extract the text of every page, in page order.
pub fn extract_text_from_pdf(path: &Path) -> Result<String, QuizError> {
    ensure_exists(path)?;
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| QuizError::Pdf(format!("Failed to extract text from {}: {}", path.display(), e)))?;

    info!(path = %path.display(), chars = text.chars().count(), "Extracted PDF text");
    Ok(text)
}

pub fn page_count(path: &Path) -> Result<usize, QuizError> {
    ensure_exists(path)?;
    let doc = lopdf::Document::load(path)
        .map_err(|e| QuizError::Pdf(format!("Failed to open {}: {}", path.display(), e)))?;
    Ok(doc.get_pages().len())
}

fn ensure_exists(path: &Path) -> Result<(), QuizError> {
    if !path.exists() {
        return Err(QuizError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("PDF file not found: {}", path.display()),
        )));
    }
    Ok(())
}

/// Reject documents longer than `max_pages`.
pub fn ensure_page_limit(path: &Path, max_pages: usize) -> Result<usize, QuizError> {
    let pages = page_count(path)?;
    debug!(path = %path.display(), pages, max_pages, "Checked page count");
    if pages > max_pages {
        return Err(QuizError::InvalidInput(format!(
            "{} has {} pages; at most {} are supported",
            path.display(),
            pages,
            max_pages
        )));
    }
    Ok(pages)
}
