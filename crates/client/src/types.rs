//! Portal data model and wire payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A course subject used to namespace files on the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Matematicas,
    Fisica,
    Quimica,
    Biologia,
    Historia,
}

impl Subject {
    /// Every subject the portal knows about, in display order.
    pub const ALL: [Subject; 5] = [
        Subject::Matematicas,
        Subject::Fisica,
        Subject::Quimica,
        Subject::Biologia,
        Subject::Historia,
    ];

    /// Wire identifier of this subject.
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Matematicas => "matematicas",
            Subject::Fisica => "fisica",
            Subject::Quimica => "quimica",
            Subject::Biologia => "biologia",
            Subject::Historia => "historia",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known subjects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subject: {0}")]
pub struct ParseSubjectError(pub String);

impl FromStr for Subject {
    type Err = ParseSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| ParseSubjectError(s.to_string()))
    }
}

/// A file name as returned by the listing call.
pub type FileEntry = String;

/// Single-use, pre-signed destination for one upload.
///
/// Consumed by [`Client::upload_bytes`](crate::Client::upload_bytes), so a
/// slot cannot be written twice.
#[derive(Debug, PartialEq, Eq)]
pub struct UploadSlot {
    url: String,
}

impl UploadSlot {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Single-use, pre-signed source for one download.
#[derive(Debug, PartialEq, Eq)]
pub struct DownloadDescriptor {
    url: String,
}

impl DownloadDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Body of the create-slot request.
#[derive(Debug, Serialize)]
pub(crate) struct CreateSlotRequest<'a> {
    pub asignatura: &'a str,
    pub nombre_archivo: &'a str,
    pub tipo_contenido: &'a str,
}

/// Body of the create-slot response. `body` holds the upload URL,
/// possibly wrapped in quotes.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateSlotResponse {
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFilesResponse {
    pub archivos: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadUrlResponse {
    pub url: String,
}
