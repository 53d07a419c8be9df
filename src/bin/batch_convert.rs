use clap::Parser;
use pet_age::config::{DEFAULT_DECIMALS, MAX_DECIMALS};
use pet_age::core::batch::{convert_csv, BatchSummary};
use pet_age::utils::error::Result;
use pet_age::utils::logger;
use pet_age::utils::validation::{validate_file_extension, validate_path, validate_range};
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "batch_convert")]
#[command(about = "Convert a CSV of pets (species,breed,age) to human-equivalent ages")]
struct Args {
    /// Input CSV with the headers species,breed,age
    #[arg(short, long)]
    input: String,

    /// Output CSV; written to stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    match run(&args) {
        Ok(summary) => {
            tracing::info!(
                "✅ Converted {} of {} rows",
                summary.converted,
                summary.total()
            );
            if summary.rejected > 0 {
                eprintln!(
                    "⚠️  {} row(s) were rejected, see the error column",
                    summary.rejected
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Batch conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<BatchSummary> {
    validate_path("input", &args.input)?;
    validate_file_extension("input", &args.input, &["csv"])?;
    validate_range("decimals", args.decimals, 0, MAX_DECIMALS)?;

    tracing::info!("📁 Reading pets from: {}", args.input);
    let input = BufReader::new(File::open(&args.input)?);

    match &args.output {
        Some(path) => {
            validate_path("output", path)?;
            let output = BufWriter::new(File::create(path)?);
            let summary = convert_csv(input, output, args.decimals)?;
            tracing::info!("📁 Output saved to: {}", path);
            Ok(summary)
        }
        None => convert_csv(input, std::io::stdout().lock(), args.decimals),
    }
}
