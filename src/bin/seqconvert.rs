//! seqconvert: build inserts from a legacy sequence file
//!
//! Reads every row key / cell group record and builds the matching insert.
//! The inserts are not submitted anywhere; the run reports what was built.

use anyhow::Result;
use clap::Parser;

use regiontools::cli::ConvertCli;
use regiontools::convert::run_convert;
use regiontools::utils::{print_banner, print_info, print_path, print_success, print_warning};

fn main() -> Result<()> {
    let cli = ConvertCli::parse();

    print_banner("seqconvert", env!("CARGO_PKG_VERSION"));
    print_path("Input:", &cli.input);
    println!();

    let summary = run_convert(&cli.input)?;
    summary.display();

    if summary.records == 0 {
        print_warning(&format!("No records found in {}", cli.input.display()));
    } else if summary.empty_records > 0 {
        print_info(&format!(
            "{} of {} records carried no cells",
            summary.empty_records, summary.records
        ));
    }

    if let Some(path) = &cli.summary_json {
        summary.export_json(path)?;
        print_success(&format!("Summary written to {}", path.display()));
    }

    Ok(())
}
