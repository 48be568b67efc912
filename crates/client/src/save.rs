//! Saving downloaded bytes to the local filesystem.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::Error;

/// Reduces a suggested name to a single safe file name.
///
/// Directory components are dropped, so `apuntes/tema1.pdf` saves as
/// `tema1.pdf`. Names that resolve to nothing or to `..` are rejected.
pub(crate) fn sanitize_file_name(suggested: &str) -> Result<String, Error> {
    let normalized = suggested.replace('\\', "/");

    match Path::new(&normalized).components().next_back() {
        Some(Component::Normal(name)) => name
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidFileName(suggested.to_string())),
        _ => Err(Error::InvalidFileName(suggested.to_string())),
    }
}

/// Name of the `n`th candidate for `file_name`: the name itself for 0,
/// then `guia (1).pdf`, `guia (2).pdf`, ...
fn candidate_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }
}

/// Creates a new file inside `dir` without touching existing ones.
///
/// Uses `create_new`, so two saves racing for the same name each get
/// their own file.
async fn create_unique(dir: &Path, file_name: &str) -> Result<(File, PathBuf), Error> {
    let mut n: u32 = 0;
    loop {
        let candidate = dir.join(candidate_name(file_name, n));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Writes `bytes` under `file_name` in `dir`, creating the directory if
/// needed. Returns the path actually written.
pub(crate) async fn save_bytes(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Error> {
    tokio::fs::create_dir_all(dir).await?;
    let (mut file, target) = create_unique(dir, file_name).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(target)
}
