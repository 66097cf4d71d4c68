use clap::ValueEnum;

/// Server that hands out task slots. Task-scoped calls move to the
/// working server assigned by the start call.
pub const API_START_SERVER: &str = "api.ilovepdf.com";
pub const API_VERSION: &str = "v1";

/// The only iLovePDF tool pdf-squeeze drives.
pub const TOOL_COMPRESS: &str = "compress";

/// Required prefix of every iLovePDF public project key.
pub const API_KEY_PREFIX: &str = "project_public_";

/// Env var that overrides the persisted API key.
pub const API_KEY_ENV_VAR: &str = "ILOVEPDF_PUBLIC_KEY";

/// Env var that overrides the config file location (used by tests).
pub const CONFIG_PATH_ENV_VAR: &str = "PDF_SQUEEZE_CONFIG";

pub const DEFAULT_SUFFIX: &str = "-compressed";

/// Minimum size reduction (percent) for in-place runs when the flag is
/// not given. Non-in-place runs default to 0 and keep everything.
pub const DEFAULT_INPLACE_MIN_REDUCTION: u8 = 10;

/// The `{n}-` prefix keeps download order aligned with the sorted
/// input list when unpacking multi-file results.
pub const OUTPUT_FILENAME_TEMPLATE: &str = "{n}-{filename}-{app}";
pub const PACKAGED_FILENAME: &str = "compressed-PDFs";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

/// Extensions accepted as PDF documents. Deliberately an extension
/// match only, no content sniffing.
pub const PDF_EXTENSIONS: &[&str] = &["pdf", "pdfa", "pdfx"];

/// Server-side quality/size tradeoff. `Extreme` noticeably degrades
/// embedded image quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CompressionLevel {
    Low,
    #[default]
    Recommended,
    Extreme,
}

impl CompressionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionLevel::Low => "low",
            CompressionLevel::Recommended => "recommended",
            CompressionLevel::Extreme => "extreme",
        }
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when no input PDFs survive collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OnNoFiles {
    Error,
    #[default]
    Ignore,
}

impl std::fmt::Display for OnNoFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OnNoFiles::Error => "error",
            OnNoFiles::Ignore => "ignore",
        })
    }
}

/// What to do with input files that do not look like PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OnBadFiles {
    #[default]
    Error,
    Warn,
    Ignore,
}

impl std::fmt::Display for OnBadFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OnBadFiles::Error => "error",
            OnBadFiles::Warn => "warn",
            OnBadFiles::Ignore => "ignore",
        })
    }
}
