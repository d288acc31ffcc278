// src/main.rs
mod extractors;
mod record;
mod storage;
mod utils;

use clap::{Parser, ValueEnum};
use extractors::{ScanMode, SectionExtractor};
use std::path::{Path, PathBuf};
use storage::StorageManager;
use utils::AppError;

/// Fallback trait list when neither --traits, --traits-file nor traits.csv
/// supplies one.
const DEFAULT_TRAITS: [&str; 7] = [
    "Description",
    "Coloration",
    "Measurements",
    "Type material",
    "Distribution",
    "Diagnosis",
    "Etymology",
];

/// Command Line Interface for the rule-based taxonomic description extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a plain-text species description (PDF already converted to text)
    input: PathBuf,

    /// Comma-separated list of traits (section labels) to extract
    #[arg(long)]
    traits: Option<String>,

    /// Path to a text file with one trait per line
    #[arg(long)]
    traits_file: Option<PathBuf>,

    /// Output directory for the record JSON, CSV and metadata
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Section scanning strategy
    #[arg(long, value_enum, default_value_t = ScanModeArg::Independent)]
    scan_mode: ScanModeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScanModeArg {
    /// Each label is searched against the whole document (compatible default)
    Independent,
    /// A single scan position advances across the ordered labels
    Forward,
}

impl From<ScanModeArg> for ScanMode {
    fn from(arg: ScanModeArg) -> Self {
        match arg {
            ScanModeArg::Independent => ScanMode::IndependentSearch,
            ScanModeArg::Forward => ScanMode::ForwardCursor,
        }
    }
}

/// Resolves the trait list: inline flag, then file flag, then a traits.csv
/// in the working directory, then the hardcoded defaults.
fn resolve_traits(args: &Args) -> Result<Vec<String>, AppError> {
    if let Some(inline) = &args.traits {
        let traits: Vec<String> = inline
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if traits.is_empty() {
            return Err(AppError::Config("--traits was supplied but contained no labels".into()));
        }
        return Ok(traits);
    }

    if let Some(path) = &args.traits_file {
        return read_traits_file(path);
    }

    let default_file = Path::new("traits.csv");
    if default_file.exists() {
        return read_traits_file(default_file);
    }

    tracing::warn!("No trait list supplied and no traits.csv found; using built-in defaults");
    Ok(DEFAULT_TRAITS.iter().map(|t| t.to_string()).collect())
}

fn read_traits_file(path: &Path) -> Result<Vec<String>, AppError> {
    let contents = std::fs::read_to_string(path)?;
    let traits: Vec<String> = contents
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if traits.is_empty() {
        return Err(AppError::Config(format!("Trait file {} contains no labels", path.display())));
    }
    Ok(traits)
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Resolve the trait list
    let traits = resolve_traits(&args)?;
    tracing::info!("Using {} trait labels: {:?}", traits.len(), traits);

    // 4. Read the description text
    let text = std::fs::read_to_string(&args.input)?;
    tracing::info!("Read {} bytes from {}", text.len(), args.input.display());

    // 5. Initialize storage and extractor
    let storage = StorageManager::new(&args.output_dir)?;
    let extractor = SectionExtractor::with_mode(args.scan_mode.into());

    // 6. Extract the record
    let result = extractor.extract_record(&text, &traits)?;

    if result.species_name.is_none() && result.sections.is_empty() {
        tracing::warn!("No species name and no sections matched; output will be empty");
    }

    // 7. Save record, CSV and metadata
    let stem = args
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("record")
        .to_string();

    let record_path = storage.save_record(&result, &stem)?;
    let csv_path = storage.save_record_csv(&result, &stem)?;
    let meta_path = storage.save_metadata(&result, &stem, traits.len())?;

    tracing::info!(
        "Extraction finished: {} sections. Wrote {}, {}, {}",
        result.sections.len(),
        record_path.display(),
        csv_path.display(),
        meta_path.display()
    );

    Ok(())
}
