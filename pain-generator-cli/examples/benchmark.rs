use std::error::Error;
use std::time::Instant;

use chrono::Local;
use log::info;
use rand::thread_rng;

use pain_generator::message::Document;
use pain_generator::validate::validate;
use pain_generator::xml::to_xml_string;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let start = Instant::now();
    let document = Document::generate(100_000, Local::now().naive_local(), &mut thread_rng());
    info!("Generation took: {:.2?}", start.elapsed());

    let start = Instant::now();
    let xml = to_xml_string(&document)?;
    info!("Serialization took: {:.2?}", start.elapsed());

    let start = Instant::now();
    let report = validate(&xml)?;
    info!(
        "Validating {} transactions took: {:.2?}",
        report.transactions,
        start.elapsed()
    );

    Ok(())
}
