use crate::domain::identity::IdentityToken;
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Payer id stored on a request nobody has claimed yet.
pub const UNASSIGNED_PAYER: i32 = -1;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum PaymentRequestStatus {
    Pending,
    Assigned,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NewPaymentRequest {
    pub id: i32,
    pub invoice: i32,
    pub discount_rate: i32,
    pub request_date: String,
    pub requester: IdentityToken,
}

/// A buyer-originated request for a third-party payer to settle an invoice at a discount.
///
/// `payer_cert` holds the requester's identity until a payer claims the request.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub id: i32,
    pub invoice: i32,
    pub discount_rate: i32,
    pub payer_id: i32,
    pub payer_cert: IdentityToken,
    pub status: PaymentRequestStatus,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestView {
    pub invoice: i32,
    pub payment_id: i32,
    pub discount_rate: i32,
    pub status: PaymentRequestStatus,
}

impl PaymentRequest {
    pub const TABLE: &'static str = "PaymentRequest";

    pub fn new(new: NewPaymentRequest) -> Self {
        Self {
            id: new.id,
            invoice: new.invoice,
            discount_rate: new.discount_rate,
            payer_id: UNASSIGNED_PAYER,
            payer_cert: new.requester,
            status: PaymentRequestStatus::Pending,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.payer_id != UNASSIGNED_PAYER
    }

    /// Hands the request to a payer. Succeeds once per request.
    pub fn assign(&mut self, payer_id: i32, payer: IdentityToken) -> Result<()> {
        if self.is_assigned() {
            return Err(LedgerError::ConflictError(format!(
                "Payment request {} already has payer with id = {}",
                self.id, self.payer_id
            )));
        }
        if payer_id == UNASSIGNED_PAYER {
            return Err(LedgerError::validation(format!(
                "Payer id {UNASSIGNED_PAYER} is reserved for unassigned requests"
            )));
        }
        self.payer_id = payer_id;
        self.payer_cert = payer;
        self.status = PaymentRequestStatus::Assigned;
        Ok(())
    }

    pub fn view(&self) -> PaymentRequestView {
        PaymentRequestView {
            invoice: self.invoice,
            payment_id: self.id,
            discount_rate: self.discount_rate,
            status: self.status,
        }
    }
}
