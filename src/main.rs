use clap::Parser;
use pdf_squeeze::cli::Args;
use pdf_squeeze::constants::{OnNoFiles, DEFAULT_INPLACE_MIN_REDUCTION};
use pdf_squeeze::{
    api, batch, config, error, info, logger, utils, validation, verbose, ApplyOptions,
    BatchOptions, Result, SqueezeError,
};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    logger::set_verbosity(if args.verbose {
        logger::VERBOSE
    } else {
        logger::NORMAL
    });

    // --set-api-key exits immediately, ignoring all other flags
    if let Some(key) = &args.set_api_key {
        let path = config::store_api_key(key)?;
        info!("✅ API key saved to {}", path.display());
        return Ok(());
    }

    let api_key = config::load_api_key()?;

    if args.report_quota {
        let remaining = api::fetch_quota_sync(&api_key)?;
        info!(
            "Remaining files in this billing cycle: {}",
            utils::format_count(remaining)
        );
        return Ok(());
    }

    if !args.inplace && args.suffix.is_empty() {
        return Err(SqueezeError::NoOutputMode);
    }

    let (pdfs, not_pdfs) = batch::collect_pdf_files(&args.filenames)?;
    validation::apply_bad_files_policy(&not_pdfs, args.on_bad_files)?;

    if pdfs.is_empty() {
        return match args.on_no_files {
            OnNoFiles::Error => Err(SqueezeError::NoInputFiles),
            OnNoFiles::Ignore => {
                verbose!("Nothing to do: received no input PDF files");
                Ok(())
            }
        };
    }
    verbose!("PDFs to be compressed with iLovePDF: {}", pdfs.len());

    let min_size_reduction = args.min_size_reduction.unwrap_or(if args.inplace {
        DEFAULT_INPLACE_MIN_REDUCTION
    } else {
        0
    });

    let options = BatchOptions {
        api_key,
        level: args.compression_level,
        debug: args.debug,
        apply: ApplyOptions {
            inplace: args.inplace,
            suffix: args.suffix.clone(),
            min_size_reduction,
        },
    };

    batch::compress_pdfs(&pdfs, &options)
}
