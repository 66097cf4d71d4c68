use crate::constants::{CompressionLevel, OnBadFiles, OnNoFiles, DEFAULT_SUFFIX};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-squeeze",
    about = "Batch compress PDFs on the command line. Powered by the iLovePDF API.",
    long_about = "pdf-squeeze batches local PDF files to the iLovePDF compression service and \
                  writes the results back, either overwriting the originals or alongside them \
                  with a suffix. Requires a free iLovePDF developer key (--set-api-key).",
    version,
    after_help = "EXAMPLES:\n  \
    pdf-squeeze report.pdf slides.pdf\n  \
    pdf-squeeze ./documents -i --compression-level extreme\n  \
    pdf-squeeze --set-api-key project_public_7af905e...\n  \
    pdf-squeeze --report-quota"
)]
pub struct Args {
    #[arg(
        value_name = "FILES",
        help = "PDF files or directories to compress",
        long_help = "PDF files to compress. Directories are searched recursively for *.pdf* \
                     files. Duplicates are removed and the list is processed in sorted order."
    )]
    pub filenames: Vec<String>,

    #[arg(
        long,
        value_name = "KEY",
        help = "Set the public key used to authenticate with the iLovePDF API",
        long_help = "Persist the iLovePDF public project key and exit immediately, ignoring \
                     all other flags. Get a key by signing up at developer.ilovepdf.com."
    )]
    pub set_api_key: Option<String>,

    #[arg(
        short,
        long,
        conflicts_with = "suffix",
        help = "Compress PDFs in place, overwriting the originals"
    )]
    pub inplace: bool,

    #[arg(
        short,
        long,
        default_value = DEFAULT_SUFFIX,
        help = "String appended to the filename of compressed PDFs",
        long_help = "String inserted between file name and extension of compressed PDFs. \
                     Mutually exclusive with --inplace."
    )]
    pub suffix: String,

    #[arg(
        long,
        help = "Report the remaining file quota for the current API key and exit"
    )]
    pub report_quota: bool,

    #[arg(
        long,
        visible_alias = "cl",
        value_enum,
        default_value_t = CompressionLevel::Recommended,
        help = "How hard to squeeze the file size",
        long_help = "Server-side quality/size tradeoff. 'extreme' noticeably degrades \
                     embedded image quality."
    )]
    pub compression_level: CompressionLevel,

    #[arg(
        long,
        visible_alias = "min-red",
        value_name = "0-100",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Percent size reduction required to keep a compressed file",
        long_help = "How much smaller (in percent) compressed files need to be than the \
                     originals for them to be kept. Defaults to 10 with --inplace, else 0."
    )]
    pub min_size_reduction: Option<u8>,

    #[arg(
        long,
        help = "Dry-run against the API without compressing anything",
        long_help = "Send debug=true with every API call. The server reports the parameters \
                     it received instead of executing compression, and no local file is touched."
    )]
    pub debug: bool,

    #[arg(
        long,
        help = "Report progress while the task runs and print full file paths"
    )]
    pub verbose: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = OnNoFiles::Ignore,
        help = "What to do when no input PDFs are received",
        long_help = "'ignore' exits 0, 'error' fails. Useful when calling pdf-squeeze from \
                     shell scripts."
    )]
    pub on_no_files: OnNoFiles,

    #[arg(
        long,
        value_enum,
        default_value_t = OnBadFiles::Error,
        help = "What to do with input files that do not look like PDFs"
    )]
    pub on_bad_files: OnBadFiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["pdf-squeeze", "a.pdf"]);
        assert_eq!(args.filenames, vec!["a.pdf"]);
        assert!(!args.inplace);
        assert_eq!(args.suffix, DEFAULT_SUFFIX);
        assert_eq!(args.compression_level, CompressionLevel::Recommended);
        assert_eq!(args.on_no_files, OnNoFiles::Ignore);
        assert_eq!(args.on_bad_files, OnBadFiles::Error);
        assert_eq!(args.min_size_reduction, None);
    }

    #[test]
    fn test_inplace_conflicts_with_suffix() {
        let result = Args::try_parse_from(["pdf-squeeze", "-i", "-s", "-small", "a.pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_compression_level_alias() {
        let args = Args::parse_from(["pdf-squeeze", "--cl", "extreme", "a.pdf"]);
        assert_eq!(args.compression_level, CompressionLevel::Extreme);
    }

    #[test]
    fn test_min_size_reduction_range() {
        let result = Args::try_parse_from(["pdf-squeeze", "--min-size-reduction", "101", "a.pdf"]);
        assert!(result.is_err());
    }
}
