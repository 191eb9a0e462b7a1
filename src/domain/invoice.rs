use crate::domain::identity::IdentityToken;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum InvoiceStatus {
    Pending,
    Approved,
}

/// Validated arguments for issuing a new invoice.
#[derive(Debug, PartialEq, Clone)]
pub struct NewInvoice {
    pub number: i32,
    pub price: i32,
    pub delivery_date: String,
    pub supplier_id: i32,
    pub buyer_id: i32,
    pub supplier: IdentityToken,
    pub buyer: IdentityToken,
}

/// A supplier-issued claim for payment against a buyer.
///
/// `number`, the party ids and both identity tokens are fixed at creation.
/// Only `status` and `request_date` change afterwards. Both dates start unset
/// and never copy `delivery_date`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Invoice {
    pub number: i32,
    pub price: i32,
    pub status: InvoiceStatus,
    pub delivery_date: String,
    /// Date of the latest payment request raised against this invoice.
    pub request_date: Option<String>,
    /// Reserved. Stays unset until settlement is modelled.
    pub payment_date: Option<String>,
    pub supplier_id: i32,
    pub buyer_id: i32,
    pub supplier_cert: IdentityToken,
    pub buyer_cert: IdentityToken,
}

/// The fields returned to an authorized invoice reader.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub number: i32,
    pub price: i32,
    pub delivery_date: String,
    pub request_date: Option<String>,
    pub payment_date: Option<String>,
    pub status: InvoiceStatus,
}

impl NewInvoice {
    pub fn new(
        number: i32,
        price: i32,
        delivery_date: impl Into<String>,
        supplier_id: i32,
        buyer_id: i32,
        supplier: IdentityToken,
        buyer: IdentityToken,
    ) -> Self {
        Self {
            number,
            price,
            delivery_date: delivery_date.into(),
            supplier_id,
            buyer_id,
            supplier,
            buyer,
        }
    }
}

impl Invoice {
    pub const TABLE: &'static str = "Invoice";

    pub fn new(new: NewInvoice) -> Self {
        Self {
            number: new.number,
            price: new.price,
            status: InvoiceStatus::Pending,
            delivery_date: new.delivery_date,
            request_date: None,
            payment_date: None,
            supplier_id: new.supplier_id,
            buyer_id: new.buyer_id,
            supplier_cert: new.supplier,
            buyer_cert: new.buyer,
        }
    }

    /// Marks the invoice approved. Approving an approved invoice is a no-op.
    pub fn approve(&mut self) {
        self.status = InvoiceStatus::Approved;
    }

    /// Records the date of the latest payment request raised against this invoice.
    pub fn record_payment_request(&mut self, request_date: impl Into<String>) {
        self.request_date = Some(request_date.into());
    }

    /// Rejects rows whose identity anchor is missing.
    pub fn ensure_well_formed(&self) -> Result<()> {
        if self.buyer_cert.is_empty() {
            return Err(LedgerError::InvalidRecordError(format!(
                "Invoice {} has no buyer identity",
                self.number
            )));
        }
        Ok(())
    }

    pub fn view(&self) -> InvoiceView {
        InvoiceView {
            number: self.number,
            price: self.price,
            delivery_date: self.delivery_date.clone(),
            request_date: self.request_date.clone(),
            payment_date: self.payment_date.clone(),
            status: self.status,
        }
    }
}
