//! Command-line argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pdfportal_client::Subject;

/// Academic PDF portal client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (default: ~/.config/pdfportal/portal.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides the configuration file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List the known subjects
    Subjects,

    /// List the files stored for a subject
    List {
        #[arg(value_parser = parse_subject)]
        subject: Subject,
    },

    /// Upload a local PDF to a subject
    Upload {
        #[arg(value_parser = parse_subject)]
        subject: Subject,

        /// PDF file to upload
        path: PathBuf,
    },

    /// Download a file from a subject
    Download {
        #[arg(value_parser = parse_subject)]
        subject: Subject,

        /// File name as shown by `list`
        file: String,

        /// Directory to save into (default: configured download directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn parse_subject(s: &str) -> Result<Subject, String> {
    s.parse::<Subject>().map_err(|e| {
        let valid: Vec<&str> = Subject::ALL.iter().map(|s| s.as_str()).collect();
        format!("{e} (expected one of: {})", valid.join(", "))
    })
}
