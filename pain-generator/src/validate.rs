//! Reads a PAIN.001 document back and checks that it is well-formed and
//! internally consistent.

use std::fs;
use std::path::Path;

use log::debug;
use rust_decimal::Decimal;
use xot::{NameId, Node, Xot};

use crate::error::PainError;
use crate::message::{end_to_end_id, remittance_text, CURRENCY, NAMESPACE};
use crate::synth::AMOUNT_DECIMAL_PLACES;

/// Totals of a document that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub transactions: usize,
    pub control_sum: Decimal,
}

struct Names {
    document: NameId,
    initiation: NameId,
    group_header: NameId,
    payment_information: NameId,
    number_of_transactions: NameId,
    control_sum: NameId,
    transaction: NameId,
    payment_id: NameId,
    end_to_end_id: NameId,
    amount: NameId,
    instructed_amount: NameId,
    creditor: NameId,
    creditor_account: NameId,
    id: NameId,
    other: NameId,
    name: NameId,
    remittance: NameId,
    unstructured: NameId,
    currency: NameId,
}

impl Names {
    fn new(xot: &mut Xot) -> Self {
        let currency = xot.add_name("Ccy");
        let ns = xot.add_namespace(NAMESPACE);
        let mut qualified = |tag: &str| xot.add_name_ns(tag, ns);
        Names {
            document: qualified("Document"),
            initiation: qualified("CstmrCdtTrfInitn"),
            group_header: qualified("GrpHdr"),
            payment_information: qualified("PmtInf"),
            number_of_transactions: qualified("NbOfTxs"),
            control_sum: qualified("CtrlSum"),
            transaction: qualified("CdtTrfTxInf"),
            payment_id: qualified("PmtId"),
            end_to_end_id: qualified("EndToEndId"),
            amount: qualified("Amt"),
            instructed_amount: qualified("InstdAmt"),
            creditor: qualified("Cdtr"),
            creditor_account: qualified("CdtrAcct"),
            id: qualified("Id"),
            other: qualified("Othr"),
            name: qualified("Nm"),
            remittance: qualified("RmtInf"),
            unstructured: qualified("Ustrd"),
            currency,
        }
    }
}

struct Reader<'a> {
    xot: &'a Xot,
    names: &'a Names,
}

impl<'a> Reader<'a> {
    fn child(&self, parent: Node, name: NameId) -> Option<Node> {
        self.xot
            .children(parent)
            .find(|&node| self.xot.node_name(node) == Some(name))
    }

    fn require(&self, parent: Node, name: NameId, tag: &'static str) -> Result<Node, PainError> {
        self.child(parent, name).ok_or(PainError::MissingElement(tag))
    }

    fn path(&self, parent: Node, steps: &[(NameId, &'static str)]) -> Result<Node, PainError> {
        steps
            .iter()
            .try_fold(parent, |node, &(name, tag)| self.require(node, name, tag))
    }

    fn text(&self, node: Node) -> &'a str {
        self.xot.text_content_str(node).unwrap_or("").trim()
    }

    fn check_count(
        &self,
        block: Node,
        element: &'static str,
        actual: usize,
    ) -> Result<(), PainError> {
        let node = self.require(block, self.names.number_of_transactions, "NbOfTxs")?;
        let declared = self.text(node);
        if declared.parse::<usize>().ok() == Some(actual) {
            Ok(())
        } else {
            Err(PainError::CountMismatch {
                element,
                declared: declared.to_string(),
                actual,
            })
        }
    }

    fn check_sum(
        &self,
        block: Node,
        element: &'static str,
        actual: Decimal,
    ) -> Result<(), PainError> {
        let node = self.require(block, self.names.control_sum, "CtrlSum")?;
        let declared = self.text(node);
        if declared.parse::<Decimal>().ok() == Some(actual) {
            Ok(())
        } else {
            Err(PainError::ControlSumMismatch {
                element,
                declared: declared.to_string(),
                actual,
            })
        }
    }

    /// Checks one `CdtTrfTxInf` and returns its amount.
    fn transaction(&self, node: Node, sequence: usize) -> Result<Decimal, PainError> {
        let names = self.names;

        let e2e = self.path(
            node,
            &[
                (names.payment_id, "PmtId"),
                (names.end_to_end_id, "EndToEndId"),
            ],
        )?;
        if self.text(e2e) != end_to_end_id(sequence) {
            return Err(PainError::SequenceMismatch {
                index: sequence,
                found: self.text(e2e).to_string(),
            });
        }

        let instd_amt = self.path(
            node,
            &[(names.amount, "Amt"), (names.instructed_amount, "InstdAmt")],
        )?;
        let text = self.text(instd_amt);
        let amount = text
            .parse::<Decimal>()
            .ok()
            .filter(|amount| {
                amount.scale() == AMOUNT_DECIMAL_PLACES && amount.is_sign_positive()
            })
            .ok_or_else(|| PainError::InvalidAmount(text.to_string()))?;
        match self.xot.get_attribute(instd_amt, names.currency) {
            Some(CURRENCY) => {}
            Some(other) => {
                return Err(PainError::InvalidAmount(format!("{text} in {other}")));
            }
            None => return Err(PainError::InvalidAmount(format!("{text} without Ccy"))),
        }

        self.path(node, &[(names.creditor, "Cdtr"), (names.name, "Nm")])?;
        self.path(
            node,
            &[
                (names.creditor_account, "CdtrAcct"),
                (names.id, "Id"),
                (names.other, "Othr"),
                (names.id, "Id"),
            ],
        )?;

        let ustrd = self.path(
            node,
            &[(names.remittance, "RmtInf"), (names.unstructured, "Ustrd")],
        )?;
        if self.text(ustrd) != remittance_text(sequence) {
            return Err(PainError::SequenceMismatch {
                index: sequence,
                found: self.text(ustrd).to_string(),
            });
        }

        Ok(amount)
    }
}

/// Parses `xml` and checks the structure, the sequence numbering and both
/// sets of header totals.
///
/// # Errors
/// Errors on blank or malformed content, on a missing element, or when a
/// header disagrees with the transactions it describes
pub fn validate(xml: &str) -> Result<Report, PainError> {
    if xml.trim().is_empty() {
        return Err(PainError::EmptyContent);
    }

    let mut xot = Xot::new();
    let names = Names::new(&mut xot);
    let doc = xot
        .parse(xml)
        .map_err(|e| PainError::ParseError(e.to_string()))?;
    let reader = Reader {
        xot: &xot,
        names: &names,
    };

    let root = reader.require(doc, names.document, "Document")?;
    let initiation = reader.require(root, names.initiation, "CstmrCdtTrfInitn")?;
    let group_header = reader.require(initiation, names.group_header, "GrpHdr")?;
    let payment = reader.require(initiation, names.payment_information, "PmtInf")?;

    let mut control_sum = Decimal::ZERO;
    let mut count = 0;
    for (i, node) in xot
        .children(payment)
        .filter(|&node| xot.node_name(node) == Some(names.transaction))
        .enumerate()
    {
        control_sum += reader.transaction(node, i + 1)?;
        count += 1;
    }
    control_sum.rescale(AMOUNT_DECIMAL_PLACES);

    reader.check_count(group_header, "GrpHdr", count)?;
    reader.check_count(payment, "PmtInf", count)?;
    reader.check_sum(group_header, "GrpHdr", control_sum)?;
    reader.check_sum(payment, "PmtInf", control_sum)?;

    debug!("Validated {} transactions", count);
    Ok(Report {
        transactions: count,
        control_sum,
    })
}

/// # Errors
/// Errors when the file cannot be read or does not pass [validate]
pub fn validate_file(path: &Path) -> Result<Report, PainError> {
    let xml = fs::read_to_string(path)?;
    validate(&xml)
}
