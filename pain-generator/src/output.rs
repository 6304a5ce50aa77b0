use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use rust_decimal::Decimal;

use crate::error::PainError;
use crate::message::Document;
use crate::xml;

pub const DEFAULT_OUTPUT_DIR: &str = "generated";
pub const FILE_LABEL: &str = "113";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// What was written, for reporting on the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub path: PathBuf,
    pub records: usize,
    pub total_amount: Decimal,
    pub file_size: u64,
}

/// `pain-113-<n>k.xml` for thousands-scale counts, `pain-113-<n>.xml` otherwise
#[must_use]
pub fn file_name(count: usize) -> String {
    if count >= 1_000 {
        format!("pain-{}-{}k.xml", FILE_LABEL, count / 1_000)
    } else {
        format!("pain-{FILE_LABEL}-{count}.xml")
    }
}

#[must_use]
pub fn output_path(dir: &Path, count: usize) -> PathBuf {
    dir.join(file_name(count))
}

/// Serializes `document` into `dir`, creating the directory if needed.
///
/// # Errors
/// Errors when the document cannot be serialized or the file cannot be written
pub fn write_document(dir: &Path, document: &Document) -> Result<Summary, PainError> {
    let records = document.transactions().len();
    let path = output_path(dir, records);
    let xml = xml::to_xml_string(document)?;

    fs::create_dir_all(dir)?;
    fs::write(&path, xml)?;
    let file_size = fs::metadata(&path)?.len();
    debug!("Wrote {} bytes to {}", file_size, path.display());

    Ok(Summary {
        path,
        records,
        total_amount: document.control_sum(),
        file_size,
    })
}

impl Summary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn megabytes(&self) -> f64 {
        self.file_size as f64 / BYTES_PER_MB
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successfully generated {}", self.path.display())?;
        writeln!(f, "Records: {}", group_thousands(&self.records.to_string()))?;
        writeln!(f, "Total Amount: ${}", format_money(self.total_amount))?;
        write!(f, "File Size: {:.2} MB", self.megabytes())
    }
}

/// `1234567.8` -> `1,234,567.80`
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{rounded:.2}");
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!("{sign}{}.{fraction}", group_thousands(whole))
}

/// Inserts a comma between every group of three digits.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
