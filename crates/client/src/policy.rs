//! Caller-side upload policy.
//!
//! The portal only accepts PDF documents. The transfer client does not
//! enforce this itself; front ends call [`check_pdf`] before uploading.

use std::path::Path;

/// The only content type the portal accepts for uploads.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PDF_MAGIC: &[u8] = b"%PDF-";

/// PDF readers accept the header anywhere within this many leading bytes.
const HEADER_SEARCH_LEN: usize = 1024;

/// Reasons a local file is refused before upload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("only PDF files are allowed: {0}")]
    NotPdf(String),

    #[error("file is empty: {0}")]
    Empty(String),
}

/// Validates that a file looks like a PDF and returns its content type.
///
/// Requires a `.pdf` extension (any case) and the `%PDF-` header within
/// the first 1024 bytes.
pub fn check_pdf(file_name: &str, bytes: &[u8]) -> Result<&'static str, PolicyError> {
    if bytes.is_empty() {
        return Err(PolicyError::Empty(file_name.to_string()));
    }

    let has_pdf_extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let head = &bytes[..bytes.len().min(HEADER_SEARCH_LEN)];
    let has_header = head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC);

    if !has_pdf_extension || !has_header {
        return Err(PolicyError::NotPdf(file_name.to_string()));
    }

    Ok(PDF_CONTENT_TYPE)
}
