//! Assembles a [Document](crate::message::Document) into a `xot` tree and
//! serializes it.

use chrono::{NaiveDateTime, Timelike};
use log::debug;
use xot::output::xml::{Declaration, Parameters};
use xot::{NameId, NamespaceId, Node, Xot};

use crate::error::PainError;
use crate::message::{CreditTransfer, Document, GroupHeader, PaymentInformation, NAMESPACE};

/// Format used for `CreDtTm`, local time with microseconds
pub const CREATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
/// `CreDtTm` for a timestamp on a whole second
pub const CREATION_FORMAT_WHOLE: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// ISO-8601 local time, with the microsecond fraction left out when it is zero
#[must_use]
pub fn creation_timestamp(time: &NaiveDateTime) -> String {
    if time.nanosecond() / 1_000 == 0 {
        time.format(CREATION_FORMAT_WHOLE).to_string()
    } else {
        time.format(CREATION_FORMAT).to_string()
    }
}

/// Appends elements in the PAIN.001 namespace under a parent node.
struct TreeBuilder<'a> {
    xot: &'a mut Xot,
    namespace: NamespaceId,
}

impl<'a> TreeBuilder<'a> {
    fn new(xot: &'a mut Xot) -> Self {
        let namespace = xot.add_namespace(NAMESPACE);
        TreeBuilder { xot, namespace }
    }

    fn name(&mut self, tag: &str) -> NameId {
        self.xot.add_name_ns(tag, self.namespace)
    }

    fn element(&mut self, parent: Node, tag: &str) -> Result<Node, PainError> {
        let name = self.name(tag);
        let node = self.xot.new_element(name);
        self.xot.append(parent, node)?;
        Ok(node)
    }

    fn text_element(&mut self, parent: Node, tag: &str, text: &str) -> Result<Node, PainError> {
        let node = self.element(parent, tag)?;
        self.xot.append_text(node, text)?;
        Ok(node)
    }

    /// `<parent><Id><Othr><Id>id</Id></Othr></Id></parent>`
    fn other_account(&mut self, parent: Node, tag: &str, id: &str) -> Result<(), PainError> {
        let account = self.element(parent, tag)?;
        let account_id = self.element(account, "Id")?;
        let other = self.element(account_id, "Othr")?;
        self.text_element(other, "Id", id)?;
        Ok(())
    }

    fn group_header(&mut self, parent: Node, header: &GroupHeader) -> Result<(), PainError> {
        let grp_hdr = self.element(parent, "GrpHdr")?;
        self.text_element(grp_hdr, "MsgId", &header.message_id)?;
        self.text_element(
            grp_hdr,
            "CreDtTm",
            &creation_timestamp(&header.creation_date_time),
        )?;
        self.text_element(
            grp_hdr,
            "NbOfTxs",
            &header.number_of_transactions.to_string(),
        )?;
        self.text_element(grp_hdr, "CtrlSum", &header.control_sum.to_string())?;
        let initg_pty = self.element(grp_hdr, "InitgPty")?;
        self.text_element(initg_pty, "Nm", &header.initiating_party)?;
        Ok(())
    }

    fn payment_information(
        &mut self,
        parent: Node,
        payment: &PaymentInformation,
    ) -> Result<(), PainError> {
        let pmt_inf = self.element(parent, "PmtInf")?;
        self.text_element(pmt_inf, "PmtInfId", &payment.payment_information_id)?;
        self.text_element(pmt_inf, "PmtMtd", &payment.payment_method)?;
        self.text_element(
            pmt_inf,
            "NbOfTxs",
            &payment.number_of_transactions.to_string(),
        )?;
        self.text_element(pmt_inf, "CtrlSum", &payment.control_sum.to_string())?;
        self.text_element(
            pmt_inf,
            "ReqdExctnDt",
            &payment
                .requested_execution_date
                .format(DATE_FORMAT)
                .to_string(),
        )?;
        let dbtr = self.element(pmt_inf, "Dbtr")?;
        self.text_element(dbtr, "Nm", &payment.debtor_name)?;
        self.other_account(pmt_inf, "DbtrAcct", &payment.debtor_account)?;

        for transaction in &payment.transactions {
            self.credit_transfer(pmt_inf, transaction)?;
        }
        Ok(())
    }

    fn credit_transfer(&mut self, parent: Node, tx: &CreditTransfer) -> Result<(), PainError> {
        let txn_inf = self.element(parent, "CdtTrfTxInf")?;

        let pmt_id = self.element(txn_inf, "PmtId")?;
        self.text_element(pmt_id, "EndToEndId", &tx.end_to_end_id)?;

        let amt = self.element(txn_inf, "Amt")?;
        let instd_amt = self.text_element(amt, "InstdAmt", &tx.amount.to_string())?;
        // Attributes are unqualified, not in the default namespace
        let ccy = self.xot.add_name("Ccy");
        self.xot
            .attributes_mut(instd_amt)
            .insert(ccy, tx.currency.clone());

        let cdtr = self.element(txn_inf, "Cdtr")?;
        self.text_element(cdtr, "Nm", &tx.creditor_name)?;

        self.other_account(txn_inf, "CdtrAcct", &tx.creditor_account)?;

        let rmt_inf = self.element(txn_inf, "RmtInf")?;
        self.text_element(rmt_inf, "Ustrd", &tx.remittance)?;
        Ok(())
    }
}

/// Builds the full element tree for `document` and returns the document node.
///
/// # Errors
/// Errors when `xot` rejects a structural change to the tree
pub fn build_tree(xot: &mut Xot, document: &Document) -> Result<Node, PainError> {
    let mut builder = TreeBuilder::new(xot);
    let root_name = builder.name("Document");
    let root = builder.xot.new_element(root_name);
    let prefix = builder.xot.empty_prefix();
    let namespace = builder.namespace;
    builder.xot.namespaces_mut(root).insert(prefix, namespace);

    let initn = builder.element(root, "CstmrCdtTrfInitn")?;
    builder.group_header(initn, &document.group_header)?;
    builder.payment_information(initn, &document.payment_information)?;

    let doc = builder.xot.new_document_with_element(root)?;
    debug!(
        "Built tree for {} transactions",
        document.transactions().len()
    );
    Ok(doc)
}

/// Serializes `document` with an UTF-8 declaration and indentation.
///
/// # Errors
/// Errors when the tree cannot be built or serialized
#[allow(clippy::default_trait_access)]
pub fn to_xml_string(document: &Document) -> Result<String, PainError> {
    let mut xot = Xot::new();
    let doc = build_tree(&mut xot, document)?;
    let parameters = Parameters {
        indentation: Some(Default::default()),
        declaration: Some(Declaration {
            encoding: Some("UTF-8".to_string()),
            ..Declaration::default()
        }),
        ..Parameters::default()
    };
    Ok(xot.serialize_xml_string(parameters, doc)?)
}
