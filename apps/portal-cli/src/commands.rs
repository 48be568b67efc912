//! Subcommand handlers.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use pdfportal_client::{Client, FileEntry, Subject, check_pdf};

use crate::args::Command;
use crate::config::Config;

/// Runs one subcommand to completion.
pub async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Subjects => {
            for subject in Subject::ALL {
                println!("{subject}");
            }
            Ok(())
        }
        Command::List { subject } => list(&client(config)?, subject).await,
        Command::Upload { subject, path } => upload(&client(config)?, subject, &path).await,
        Command::Download { subject, file, out } => {
            let dest = out.unwrap_or_else(|| config.download_dir());
            download(&client(config)?, subject, &file, &dest).await
        }
    }
}

fn client(config: &Config) -> anyhow::Result<Client> {
    Client::new(&config.base_url, &config.credentials()).context("failed to build API client")
}

async fn list(client: &Client, subject: Subject) -> anyhow::Result<()> {
    let files = client
        .list_files(subject.as_str())
        .await
        .with_context(|| format!("failed to list files for {subject}"))?;

    if files.is_empty() {
        tracing::info!(%subject, "no files for subject");
    }
    write_listing(&mut std::io::stdout().lock(), &files)?;
    Ok(())
}

/// Writes one file name per line. Nothing else goes to `out`, so the
/// listing can be piped.
fn write_listing(out: &mut impl Write, files: &[FileEntry]) -> std::io::Result<()> {
    for file in files {
        writeln!(out, "{file}")?;
    }
    Ok(())
}

async fn upload(client: &Client, subject: Subject, path: &Path) -> anyhow::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file path: {}", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let content_type = check_pdf(file_name, &bytes)?;

    tracing::info!(%subject, file_name, size = bytes.len(), "uploading");
    client
        .upload(subject.as_str(), file_name, content_type, bytes)
        .await
        .with_context(|| format!("failed to upload {file_name} to {subject}"))?;

    println!("uploaded {file_name} to {subject}");
    Ok(())
}

async fn download(
    client: &Client,
    subject: Subject,
    file: &str,
    dest: &Path,
) -> anyhow::Result<()> {
    let path = client
        .download(subject.as_str(), file, dest)
        .await
        .with_context(|| format!("failed to download {file} from {subject}"))?;

    println!("saved {}", path.display());
    Ok(())
}
