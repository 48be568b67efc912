//! Transfer client for the academic PDF portal.
//!
//! Wraps the portal's remote API: upload slots are created with the writer
//! key and filled with a single PUT, listings and download descriptors are
//! resolved with the reader key, and downloaded bytes are saved to disk.

pub mod client;
pub mod error;
pub mod policy;
mod save;
pub mod slot;
pub mod types;

pub use client::{Client, Credentials};
pub use error::Error;
pub use policy::{PDF_CONTENT_TYPE, PolicyError, check_pdf};
pub use types::{DownloadDescriptor, FileEntry, ParseSubjectError, Subject, UploadSlot};
