pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod output;
pub mod utils;
pub mod validation;

pub use api::{CompressTask, CompressionClient, ProcessOutcome, ProcessResponse, TaskState};
pub use batch::{collect_pdf_files, compress_pdfs, BatchOptions};
pub use constants::{CompressionLevel, OnBadFiles, OnNoFiles, DEFAULT_SUFFIX};
pub use error::{Result, SqueezeError};
pub use output::{apply_result, suffixed_path, ApplyOptions};
pub use validation::is_pdf_file;
