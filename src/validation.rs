use crate::constants::{OnBadFiles, PDF_EXTENSIONS};
use crate::error::{Result, SqueezeError};
use crate::warn;
use std::path::{Path, PathBuf};

/// Check whether a path looks like a PDF document.
///
/// This is an extension match only (pdf, pdfa, pdfx, case insensitive,
/// trailing whitespace tolerated), never content sniffing. Matches what
/// the remote API itself accepts per file name.
pub fn is_pdf_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.trim_end().to_lowercase(),
        None => return false,
    };

    name.rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && PDF_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Split inputs into PDFs and everything else, preserving order.
pub fn partition_pdf_files(files: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    files
        .iter()
        .cloned()
        .partition(|path| is_pdf_file(path))
}

/// Apply the --on-bad-files policy to inputs that failed the PDF check.
/// Runs before any network call.
pub fn apply_bad_files_policy(not_pdfs: &[PathBuf], policy: OnBadFiles) -> Result<()> {
    if not_pdfs.is_empty() {
        return Ok(());
    }

    let listing = not_pdfs
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    match policy {
        OnBadFiles::Error => Err(SqueezeError::BadInputFiles {
            count: not_pdfs.len(),
            files: listing,
        }),
        OnBadFiles::Warn => {
            warn!(
                "Got {} input files without a PDF extension: {}",
                not_pdfs.len(),
                listing
            );
            Ok(())
        }
        OnBadFiles::Ignore => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_file() {
        assert!(is_pdf_file(Path::new("doc.pdf")));
        assert!(is_pdf_file(Path::new("doc.PDF")));
        assert!(is_pdf_file(Path::new("doc.pdfa")));
        assert!(is_pdf_file(Path::new("doc.pdfx")));
        assert!(is_pdf_file(Path::new("doc.pdf ")));
        assert!(is_pdf_file(Path::new("dir/some file.Pdf")));

        assert!(!is_pdf_file(Path::new("doc.txt")));
        assert!(!is_pdf_file(Path::new("doc.pdfb")));
        assert!(!is_pdf_file(Path::new("doc")));
        assert!(!is_pdf_file(Path::new(".pdf")));
    }

    #[test]
    fn test_partition_pdf_files() {
        let files = vec![
            PathBuf::from("a.pdf"),
            PathBuf::from("b.svg"),
            PathBuf::from("c.pdfa"),
            PathBuf::from("d.png"),
        ];
        let (pdfs, not_pdfs) = partition_pdf_files(&files);
        assert_eq!(pdfs, vec![PathBuf::from("a.pdf"), PathBuf::from("c.pdfa")]);
        assert_eq!(not_pdfs, vec![PathBuf::from("b.svg"), PathBuf::from("d.png")]);
    }

    #[test]
    fn test_bad_files_policy_error() {
        let bad = vec![PathBuf::from("foo.svg"), PathBuf::from("bar.png")];
        let result = apply_bad_files_policy(&bad, OnBadFiles::Error);
        assert!(matches!(
            result,
            Err(SqueezeError::BadInputFiles { count: 2, .. })
        ));
    }

    #[test]
    fn test_bad_files_policy_warn_and_ignore() {
        let bad = vec![PathBuf::from("foo.svg")];
        assert!(apply_bad_files_policy(&bad, OnBadFiles::Warn).is_ok());
        assert!(apply_bad_files_policy(&bad, OnBadFiles::Ignore).is_ok());
        assert!(apply_bad_files_policy(&[], OnBadFiles::Error).is_ok());
    }
}
