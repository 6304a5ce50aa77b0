use std::error::Error;
use std::path::Path;

use chrono::Local;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use pain_generator::message::{record_count, Document};
use pain_generator::output::{self, DEFAULT_OUTPUT_DIR};
use pain_generator::validate;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of payment records to generate, negative values yield none
    #[clap(default_value_t = 100, allow_hyphen_values = true)]
    pub(crate) count: i64,
    /// Directory the XML file is written to
    #[clap(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub(crate) out_dir: String,
    /// Seed the generator for reproducible names, accounts and amounts
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Read the written file back and check its structure and totals
    #[clap(long)]
    pub(crate) verify: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let count = record_count(cli.count);
    let now = Local::now().naive_local();
    let document = match cli.seed {
        Some(seed) => Document::generate(count, now, &mut StdRng::seed_from_u64(seed)),
        None => Document::generate(count, now, &mut thread_rng()),
    };
    let summary = output::write_document(Path::new(&cli.out_dir), &document)?;

    if cli.verify {
        let report = validate::validate_file(&summary.path)?;
        info!(
            "Verified {} transactions, control sum {}",
            report.transactions, report.control_sum
        );
    }

    println!("\n{}", summary);
    Ok(())
}
