//! Pricesheet CLI - convert a repair price spreadsheet to a Markdown report
//!
//! ```bash
//! pricesheet --input Samsung.xlsx --output samsung.md
//! ```
//!
//! Business and assistant names can be overridden with
//! `PRICESHEET_BUSINESS_NAME` / `PRICESHEET_ASSISTANT_NAME`, also read
//! from a `.env` file. `PRICESHEET_QUIET=1` hides progress output.

use clap::Parser;
use pricesheet::{convert_file, ConvertOptions, PipelineError, ReportConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pricesheet")]
#[command(about = "Convert a repair price spreadsheet into a Markdown price report", long_about = None)]
struct Cli {
    /// Input spreadsheet (xlsx, xls, xlsb, ods or csv); only the first sheet is read
    #[arg(long)]
    input: PathBuf,

    /// Output Markdown file (overwritten if it exists)
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let options = ConvertOptions {
        config: ReportConfig::from_env(),
        date: None,
    };

    match convert_file(&cli.input, &cli.output, &options) {
        Ok(summary) => {
            println!(
                "✨ Done! {} models converted and saved to: {}",
                summary.models,
                summary.output.display()
            );
        }
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

fn report_error(err: &PipelineError) {
    match err {
        PipelineError::FileNotFound(path) => {
            eprintln!("❌ Error: input file not found: {}", path.display());
        }
        other => {
            eprintln!("❌ Unexpected error: {}", other);
        }
    }
}
