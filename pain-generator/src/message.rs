use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::info;
use rand::Rng;
use rust_decimal::Decimal;

use crate::output::group_thousands;
use crate::synth;

pub const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.001.001.03";
pub const CURRENCY: &str = "USD";
pub const PAYMENT_METHOD: &str = "TRF";
pub const INITIATING_PARTY: &str = "Payment Initiator";
pub const DEBTOR_NAME: &str = "Primary Debtor Account";
pub const DEBTOR_ACCOUNT: &str = "DEBTOR-MASTER-001";

/// Progress is logged every this many records, for documents larger than it
pub const PROGRESS_INTERVAL: usize = 5_000;

/// A `CstmrCdtTrfInitn` message with a single payment information block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub group_header: GroupHeader,
    pub payment_information: PaymentInformation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    pub message_id: String,
    pub creation_date_time: NaiveDateTime,
    pub number_of_transactions: usize,
    pub control_sum: Decimal,
    pub initiating_party: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInformation {
    pub payment_information_id: String,
    pub payment_method: String,
    pub number_of_transactions: usize,
    pub control_sum: Decimal,
    pub requested_execution_date: NaiveDate,
    pub debtor_name: String,
    pub debtor_account: String,
    pub transactions: Vec<CreditTransfer>,
}

/// One `CdtTrfTxInf` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditTransfer {
    pub sequence: usize,
    pub end_to_end_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub creditor_name: String,
    pub creditor_account: String,
    pub remittance: String,
}

/// Record count for a requested value; anything below zero yields an empty
/// document rather than an error.
#[must_use]
pub fn record_count(requested: i64) -> usize {
    usize::try_from(requested).unwrap_or(0)
}

fn generating_message(count: usize) -> String {
    format!(
        "Generating {} payment records...",
        group_thousands(&count.to_string())
    )
}

fn generated_message(sequence: usize) -> String {
    format!("  Generated {} records...", group_thousands(&sequence.to_string()))
}

#[must_use]
pub fn end_to_end_id(sequence: usize) -> String {
    format!("E2E-{sequence:08}")
}

#[must_use]
pub fn remittance_text(sequence: usize) -> String {
    format!("Payment ref {sequence:08}")
}

impl CreditTransfer {
    pub fn generate<R: Rng + ?Sized>(sequence: usize, amount: Decimal, rng: &mut R) -> Self {
        CreditTransfer {
            sequence,
            end_to_end_id: end_to_end_id(sequence),
            amount,
            currency: CURRENCY.to_string(),
            creditor_name: synth::creditor_name(rng),
            creditor_account: synth::account_id(rng),
            remittance: remittance_text(sequence),
        }
    }
}

impl Document {
    /// Builds a message of `count` credit transfers stamped with `now`.
    ///
    /// All amounts are drawn before any transaction so that both headers can
    /// carry the control sum.
    pub fn generate<R: Rng + ?Sized>(count: usize, now: NaiveDateTime, rng: &mut R) -> Self {
        let amounts: Vec<Decimal> = (0..count).map(|_| synth::amount(rng)).collect();
        let control_sum = control_sum(&amounts);
        let stamp = now.format("%Y%m%d%H%M%S");

        let group_header = GroupHeader {
            message_id: format!("MSG-{stamp}-001"),
            creation_date_time: now,
            number_of_transactions: count,
            control_sum,
            initiating_party: INITIATING_PARTY.to_string(),
        };

        info!("{}", generating_message(count));
        let mut transactions = Vec::with_capacity(count);
        for (sequence, amount) in (1..=count).zip(amounts) {
            if count > PROGRESS_INTERVAL && sequence % PROGRESS_INTERVAL == 0 {
                info!("{}", generated_message(sequence));
            }
            transactions.push(CreditTransfer::generate(sequence, amount, rng));
        }

        let payment_information = PaymentInformation {
            payment_information_id: format!("PMTINF-{stamp}"),
            payment_method: PAYMENT_METHOD.to_string(),
            number_of_transactions: count,
            control_sum,
            requested_execution_date: (now + Duration::days(1)).date(),
            debtor_name: DEBTOR_NAME.to_string(),
            debtor_account: DEBTOR_ACCOUNT.to_string(),
            transactions,
        };

        Document {
            group_header,
            payment_information,
        }
    }

    #[must_use]
    pub fn transactions(&self) -> &[CreditTransfer] {
        &self.payment_information.transactions
    }

    #[must_use]
    pub fn control_sum(&self) -> Decimal {
        self.group_header.control_sum
    }
}

/// Sum of already rounded amounts, always reported with two decimals
#[must_use]
pub fn control_sum(amounts: &[Decimal]) -> Decimal {
    let mut sum: Decimal = amounts.iter().sum();
    sum.rescale(synth::AMOUNT_DECIMAL_PLACES);
    sum
}
