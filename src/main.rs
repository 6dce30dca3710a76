use std::path::PathBuf;

use clap::{ArgAction, Parser};
use gstr2tally::convert::{self, ConvertOptions};
use gstr2tally::{ConvertError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    for input in &cli.inputs {
        if !input.exists() {
            return Err(ConvertError::MissingInput(input.clone()));
        }
    }

    let options = ConvertOptions {
        company: cli.company,
        use_document_numbers: cli.use_document_numbers,
    };
    let summary = convert::convert_to_file(&cli.inputs, &cli.output, &options)?;
    println!(
        "Parsed {} invoice rows and {} note rows; wrote {} vouchers to {}",
        summary.invoice_rows,
        summary.note_rows,
        summary.vouchers,
        cli.output.display()
    );
    Ok(())
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init()
        .map_err(|error| ConvertError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert GSTR-2A portal workbooks into a single Tally import XML."
)]
struct Cli {
    /// Tally company name, exactly as configured in Tally.
    #[arg(long)]
    company: String,

    /// Output XML file path.
    #[arg(long, default_value = "gstr2a_all_in_one.xml")]
    output: PathBuf,

    /// Leave voucher numbers blank instead of reusing document numbers.
    #[arg(
        long = "no-voucher-numbers",
        action = ArgAction::SetFalse,
        default_value_t = true
    )]
    use_document_numbers: bool,

    /// Input workbook paths (portal exports).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}
