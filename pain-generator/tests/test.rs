use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use pain_generator::error::PainError;
use pain_generator::message::{record_count, Document};
use pain_generator::output::write_document;
use pain_generator::validate::{validate, validate_file};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_micro_opt(3, 4, 5, 678_901)
        .unwrap()
}

#[test]
fn test_valid_fixture() {
    let report = validate_file(Path::new("../resources/input/pain-113-3.xml")).unwrap();
    assert_eq!(report.transactions, 3);
    assert_eq!(report.control_sum, Decimal::new(5_260_049, 2));
}

#[test]
fn test_empty_fixture() {
    let report = validate_file(Path::new("../resources/input/pain-113-0.xml")).unwrap();
    assert_eq!(report.transactions, 0);
    assert_eq!(report.control_sum, Decimal::ZERO);
}

#[test]
fn test_bad_control_sum() {
    let result = validate_file(Path::new("../resources/input/bad-ctrlsum.xml"));
    assert!(matches!(
        result,
        Err(PainError::ControlSumMismatch {
            element: "PmtInf",
            ..
        })
    ));
}

#[test]
fn test_bad_count() {
    let result = validate_file(Path::new("../resources/input/bad-count.xml"));
    assert!(matches!(
        result,
        Err(PainError::CountMismatch {
            element: "GrpHdr",
            actual: 3,
            ..
        })
    ));
}

#[test]
fn test_bad_amount() {
    let result = validate_file(Path::new("../resources/input/bad-amount.xml"));
    assert!(matches!(result, Err(PainError::InvalidAmount(amount)) if amount == "2500.5"));
}

#[test]
fn test_truncated_file() {
    let result = validate_file(Path::new("../resources/input/truncated.xml"));
    assert!(matches!(result, Err(PainError::ParseError(_))));
}

#[test]
fn test_missing_file() {
    let result = validate_file(Path::new("../resources/input/does-not-exist.xml"));
    assert!(matches!(result, Err(PainError::IoError(_))));
}

#[test]
fn test_generate_write_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let document = Document::generate(1_200, now(), &mut rng);

    let summary = write_document(dir.path(), &document).unwrap();
    assert_eq!(summary.path, dir.path().join("pain-113-1k.xml"));

    let xml = fs::read_to_string(&summary.path).unwrap();
    assert_eq!(xml.matches("<CdtTrfTxInf>").count(), 1_200);
    assert!(xml.contains("<EndToEndId>E2E-00001200</EndToEndId>"));
    assert!(xml.contains("<Ustrd>Payment ref 00001200</Ustrd>"));

    let report = validate(&xml).unwrap();
    assert_eq!(report.transactions, 1_200);
    assert_eq!(report.control_sum, document.control_sum());
    assert_eq!(summary.total_amount, report.control_sum);
}

#[test]
fn test_zero_records_written() {
    let dir = tempfile::tempdir().unwrap();
    let document = Document::generate(0, now(), &mut StdRng::seed_from_u64(0));

    let summary = write_document(dir.path(), &document).unwrap();
    assert_eq!(summary.path, dir.path().join("pain-113-0.xml"));

    let xml = fs::read_to_string(&summary.path).unwrap();
    assert!(!xml.contains("<CdtTrfTxInf>"));
    assert_eq!(xml.matches("<CtrlSum>0.00</CtrlSum>").count(), 2);
    assert_eq!(xml.matches("<NbOfTxs>0</NbOfTxs>").count(), 2);
}

#[test]
fn test_negative_count_writes_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let document = Document::generate(record_count(-5), now(), &mut StdRng::seed_from_u64(5));

    let summary = write_document(dir.path(), &document).unwrap();
    assert_eq!(summary.path, dir.path().join("pain-113-0.xml"));

    let xml = fs::read_to_string(&summary.path).unwrap();
    assert!(!xml.contains("<CdtTrfTxInf>"));
    assert_eq!(xml.matches("<NbOfTxs>0</NbOfTxs>").count(), 2);
    assert_eq!(xml.matches("<CtrlSum>0.00</CtrlSum>").count(), 2);

    let report = validate(&xml).unwrap();
    assert_eq!(report.transactions, 0);
}

#[test]
fn test_generated_amounts_in_range() {
    let mut rng = StdRng::seed_from_u64(77);
    let document = Document::generate(500, now(), &mut rng);
    let min = Decimal::new(10_000, 2);
    let max = Decimal::new(5_000_000, 2);
    for tx in document.transactions() {
        assert!(tx.amount >= min && tx.amount <= max);
        assert_eq!(tx.amount.scale(), 2);
    }
}
