//! Portal transfer client.
//!
//! Async HTTP client using `reqwest`. API calls carry a static key in the
//! `X-API-Key` header; pre-signed upload and download URLs are used without
//! any credential.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::Error;
use crate::save;
use crate::slot::{clean_slot_url, validate_slot_url};
use crate::types::{
    CreateSlotRequest, CreateSlotResponse, DownloadDescriptor, DownloadUrlResponse, FileEntry,
    ListFilesResponse, UploadSlot,
};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://tbk7w2ivb0.execute-api.us-east-2.amazonaws.com/dev";

const API_KEY_HEADER: &str = "x-api-key";

/// Pre-shared API keys. The writer key may create upload slots; the reader
/// key may list and resolve downloads.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    writer_key: String,
    reader_key: String,
}

impl Credentials {
    pub fn new(writer_key: impl Into<String>, reader_key: impl Into<String>) -> Self {
        Self {
            writer_key: writer_key.into(),
            reader_key: reader_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("writer_key", &"<redacted>")
            .field("reader_key", &"<redacted>")
            .finish()
    }
}

/// Portal API client.
///
/// Holds no per-operation state, so one instance can serve concurrent
/// transfers. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    writer_key: HeaderValue,
    reader_key: HeaderValue,
}

impl Client {
    /// Creates a client for the API at `base_url`.
    pub fn new(base_url: &str, credentials: &Credentials) -> Result<Self, Error> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            writer_key: key_header(&credentials.writer_key)?,
            reader_key: key_header(&credentials.reader_key)?,
        })
    }

    /// Base URL requests are issued against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Asks the portal for a pre-signed slot to upload `file_name` into.
    ///
    /// The slot URL arrives as a possibly quote-wrapped string and is
    /// cleaned before being returned.
    pub async fn create_upload_slot(
        &self,
        subject: &str,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadSlot, Error> {
        tracing::debug!(subject, file_name, content_type, "creating upload slot");

        let request = CreateSlotRequest {
            asignatura: subject,
            nombre_archivo: file_name,
            tipo_contenido: content_type,
        };

        let resp = self
            .http
            .post(self.endpoint("/"))
            .header(API_KEY_HEADER, self.writer_key.clone())
            .json(&request)
            .send()
            .await?;
        let resp = check_status(resp, "create_upload_slot").await?;
        let data: CreateSlotResponse = read_json(resp).await?;

        if let Some(code) = data.status_code {
            tracing::debug!(status_code = code, "slot response carries embedded status");
        }

        let url = clean_slot_url(&data.body)?;
        Ok(UploadSlot::new(url))
    }

    /// Writes the full payload to a slot with a single PUT.
    ///
    /// The slot URL is checked before any request is sent.
    pub async fn upload_bytes(
        &self,
        slot: UploadSlot,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), Error> {
        let url = validate_slot_url(slot.url())?;
        let size = bytes.len();

        tracing::debug!(host = url.host_str(), size, content_type, "uploading file");

        let resp = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        check_status(resp, "upload_bytes").await?;

        tracing::info!(size, "file uploaded");
        Ok(())
    }

    /// Lists the files stored for `subject`, in the order the portal
    /// returns them.
    pub async fn list_files(&self, subject: &str) -> Result<Vec<FileEntry>, Error> {
        let resp = self
            .http
            .get(self.endpoint("/"))
            .header(API_KEY_HEADER, self.reader_key.clone())
            .query(&[("asignatura", subject)])
            .send()
            .await?;
        let resp = check_status(resp, "list_files").await?;
        let data: ListFilesResponse = read_json(resp).await?;

        tracing::debug!(subject, count = data.archivos.len(), "listed files");
        Ok(data.archivos)
    }

    /// Resolves the pre-signed download URL for one file.
    pub async fn get_download_descriptor(
        &self,
        subject: &str,
        file_name: &str,
    ) -> Result<DownloadDescriptor, Error> {
        let resp = self
            .http
            .get(self.endpoint("/download"))
            .header(API_KEY_HEADER, self.reader_key.clone())
            .query(&[("asignatura", subject), ("archivo", file_name)])
            .send()
            .await?;
        let resp = check_status(resp, "get_download_descriptor").await?;
        let data: DownloadUrlResponse = read_json(resp).await?;

        Ok(DownloadDescriptor::new(data.url))
    }

    /// Downloads the raw bytes behind a descriptor.
    pub async fn fetch_bytes(&self, descriptor: DownloadDescriptor) -> Result<Vec<u8>, Error> {
        let resp = self.http.get(descriptor.url()).send().await?;
        let resp = check_status(resp, "fetch_bytes").await?;
        Ok(resp.bytes().await?.to_vec())
    }

    /// Downloads a file and saves it as `suggested_name` inside `dest_dir`.
    ///
    /// An existing file is never overwritten; a numbered name is chosen
    /// instead. Returns the path written.
    pub async fn fetch_and_save(
        &self,
        descriptor: DownloadDescriptor,
        suggested_name: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, Error> {
        let file_name = save::sanitize_file_name(suggested_name)?;

        let bytes = self.fetch_bytes(descriptor).await?;
        let path = save::save_bytes(dest_dir, &file_name, &bytes).await?;

        tracing::info!(path = %path.display(), size = bytes.len(), "file downloaded");
        Ok(path)
    }

    /// Creates a slot and uploads `bytes` into it.
    pub async fn upload(
        &self,
        subject: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), Error> {
        let slot = self
            .create_upload_slot(subject, file_name, content_type)
            .await?;
        self.upload_bytes(slot, bytes, content_type).await
    }

    /// Resolves a download descriptor and saves the file under its own name.
    pub async fn download(
        &self,
        subject: &str,
        file_name: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, Error> {
        let descriptor = self.get_download_descriptor(subject, file_name).await?;
        self.fetch_and_save(descriptor, file_name, dest_dir).await
    }
}

fn key_header(key: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(key).map_err(|_| Error::InvalidCredential)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Maps a non-success status to [`Error::RemoteRequestFailed`], logging the
/// error body.
async fn check_status(resp: Response, op: &'static str) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(op, status = status.as_u16(), body = %body, "remote request failed");

    Err(Error::RemoteRequestFailed {
        status: status.as_u16(),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| Error::MalformedResponse(e.to_string()))
}
