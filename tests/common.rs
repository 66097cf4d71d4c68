use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "project_public_0123456789abcdef";

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// Path for a throwaway config file inside the temp dir. The file is
/// not created; the CLI writes it on --set-api-key.
pub fn config_path(temp_dir: &Path) -> PathBuf {
    temp_dir.join("config.toml")
}

pub fn create_fake_pdf_files(temp_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for name in ["dummy.pdf", "dummy2.pdf"] {
        let path = temp_dir.join(name);
        File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4 fake pdf data")
            .unwrap();
        files.push(path);
    }

    files
}
