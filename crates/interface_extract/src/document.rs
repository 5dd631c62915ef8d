//! Document intake validation
//!
//! Uploaded policy and bill documents are checked before any bytes are
//! sent to the extraction service: the format is sniffed from magic
//! bytes rather than trusted from a filename, the document must be
//! non-empty, and it must fit under the configured size ceiling. Policy
//! documents must be PDFs; bills may also be photographed (JPEG/PNG).

use std::fmt;

use thiserror::Error;

/// Document formats the extraction service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Jpeg,
    Png,
}

impl DocumentKind {
    /// Sniffs the format from the document's leading bytes
    pub fn sniff(bytes: &[u8]) -> Option<DocumentKind> {
        if bytes.starts_with(b"%PDF-") {
            Some(DocumentKind::Pdf)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(DocumentKind::Jpeg)
        } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(DocumentKind::Png)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Jpeg => "JPEG",
            DocumentKind::Png => "PNG",
        };
        write!(f, "{name}")
    }
}

/// Errors raised by document intake checks
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The upload holds no bytes
    #[error("Document is empty")]
    Empty,

    /// The upload exceeds the configured ceiling
    #[error("Document is {size} bytes, over the {limit}-byte limit")]
    TooLarge { size: usize, limit: usize },

    /// The leading bytes match no accepted format
    #[error("Document format not recognized; expected PDF, JPEG, or PNG")]
    UnrecognizedFormat,

    /// The format is recognized but not accepted for this document role
    #[error("{kind} is not accepted for a {role} document")]
    KindNotAllowed {
        kind: DocumentKind,
        role: &'static str,
    },
}

/// Validates an uploaded policy document (PDF only)
///
/// # Errors
///
/// Returns a `DocumentError` naming the violated constraint; the
/// document is never partially accepted.
pub fn validate_policy_document(bytes: &[u8], max_bytes: usize) -> Result<DocumentKind, DocumentError> {
    let kind = check_common(bytes, max_bytes)?;
    if kind != DocumentKind::Pdf {
        return Err(DocumentError::KindNotAllowed {
            kind,
            role: "policy",
        });
    }
    Ok(kind)
}

/// Validates an uploaded bill document (PDF, JPEG, or PNG)
///
/// # Errors
///
/// Returns a `DocumentError` naming the violated constraint.
pub fn validate_bill_document(bytes: &[u8], max_bytes: usize) -> Result<DocumentKind, DocumentError> {
    check_common(bytes, max_bytes)
}

fn check_common(bytes: &[u8], max_bytes: usize) -> Result<DocumentKind, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(DocumentError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    DocumentKind::sniff(bytes).ok_or(DocumentError::UnrecognizedFormat)
}
