use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqueezeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON in API response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API request to {url} failed with status {status}: {body}")]
    Server {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to upload '{file}': {reason}")]
    Upload { file: PathBuf, reason: String },

    #[error("Failed to download task result: {0}")]
    Download(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid API key: expected a key starting with '{expected}', got '{got}'")]
    InvalidApiKey { expected: String, got: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Input files must be PDFs, got {count} files with unexpected extension: {files}")]
    BadInputFiles { count: usize, files: String },

    #[error("No input files provided")]
    NoInputFiles,

    #[error("Task has no downloadable result yet, call process() first")]
    NothingToDownload,

    #[error("Unexpected file count mismatch: uploaded {uploaded} files but server produced {produced}")]
    FileCountMismatch { uploaded: usize, produced: usize },

    #[error("Failed to unpack result archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Files must either be compressed in-place (--inplace) or with a non-empty --suffix")]
    NoOutputMode,

    #[error("Async runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, SqueezeError>;
