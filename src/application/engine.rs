use crate::application::operation::Operation;
use crate::config::EngineConfig;
use crate::domain::identity::{
    ByteEqualityVerifier, IdentityToken, IdentityVerifier, IdentityVerifierBox,
};
use crate::domain::invoice::{Invoice, InvoiceView, NewInvoice};
use crate::domain::payment_request::{NewPaymentRequest, PaymentRequest, PaymentRequestView};
use crate::domain::ports::{InvoiceStoreBox, PaymentRequestStoreBox};
use crate::error::{LedgerError, Result};
use tracing::{debug, info, warn};

/// What a successful operation hands back to its caller.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Ack,
    Invoice(InvoiceView),
    PaymentRequest(PaymentRequestView),
}

/// Drives the invoice and payment request lifecycles.
///
/// `LifecycleEngine` owns both tables and the identity verifier. Each call reads
/// the current row, checks preconditions and authorization, then writes a whole
/// replacement row. Ordering between concurrent calls is the host's job: the
/// engine assumes every call sees the writes of the calls serialized before it.
pub struct LifecycleEngine {
    invoices: InvoiceStoreBox,
    payment_requests: PaymentRequestStoreBox,
    verifier: IdentityVerifierBox,
    config: EngineConfig,
}

impl LifecycleEngine {
    /// Creates an engine that authorizes by byte equality of identity tokens.
    ///
    /// # Arguments
    ///
    /// * `invoices` - The invoice table.
    /// * `payment_requests` - The payment request table.
    /// * `config` - Settings fixed for the lifetime of the engine.
    pub fn new(
        invoices: InvoiceStoreBox,
        payment_requests: PaymentRequestStoreBox,
        config: EngineConfig,
    ) -> Self {
        Self {
            invoices,
            payment_requests,
            verifier: Box::new(ByteEqualityVerifier),
            config,
        }
    }

    /// Replaces the identity verification policy.
    pub fn with_verifier(mut self, verifier: impl IdentityVerifier + 'static) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    /// Runs a parsed operation.
    pub async fn execute(&self, operation: Operation) -> Result<Outcome> {
        debug!(
            operation = operation.name(),
            read = operation.is_read(),
            "executing"
        );
        match operation {
            Operation::CreateInvoice(new) => {
                self.create_invoice(new).await?;
                Ok(Outcome::Ack)
            }
            Operation::ApproveInvoice { number, buyer } => {
                self.approve_invoice(number, &buyer).await?;
                Ok(Outcome::Ack)
            }
            Operation::CreatePaymentRequest(new) => {
                self.create_payment_request(new).await?;
                Ok(Outcome::Ack)
            }
            Operation::AssignPaymentRequest {
                id,
                payer_id,
                payer,
            } => {
                self.assign_payment_request(id, payer_id, payer).await?;
                Ok(Outcome::Ack)
            }
            Operation::InvoiceInfo { number, buyer } => self
                .invoice_info(number, &buyer)
                .await
                .map(Outcome::Invoice),
            Operation::PaymentInfo {
                id,
                payer_id,
                payer,
            } => self
                .payment_info(id, payer_id, &payer)
                .await
                .map(Outcome::PaymentRequest),
        }
    }

    /// Issues a new invoice in the `Pending` state.
    pub async fn create_invoice(&self, new: NewInvoice) -> Result<()> {
        let number = new.number;
        if !self.invoices.insert(Invoice::new(new)).await? {
            return Err(LedgerError::DuplicateKeyError {
                entity: Invoice::TABLE,
                key: number,
            });
        }
        info!(invoice = number, "invoice created");
        Ok(())
    }

    /// Approves an invoice on behalf of its buyer of record.
    pub async fn approve_invoice(&self, number: i32, caller: &IdentityToken) -> Result<()> {
        let mut invoice = self.load_invoice(number).await?;
        self.authorize("buyer", &invoice.buyer_cert, caller)?;

        invoice.approve();
        self.invoices.replace(invoice).await?;
        info!(invoice = number, "invoice approved");
        Ok(())
    }

    /// Returns an invoice to its buyer of record.
    pub async fn invoice_info(&self, number: i32, caller: &IdentityToken) -> Result<InvoiceView> {
        let invoice = self.load_invoice(number).await?;
        self.authorize("buyer", &invoice.buyer_cert, caller)?;
        Ok(invoice.view())
    }

    /// Raises a payment request against an invoice and stamps the invoice's request date.
    ///
    /// The request row is written first. The invoice is only touched once that
    /// insert has succeeded; if the invoice write then fails the caller gets a
    /// `PartialFailureError` naming the row that was left in place.
    pub async fn create_payment_request(&self, new: NewPaymentRequest) -> Result<()> {
        let mut invoice = self.load_invoice(new.invoice).await?;
        self.authorize("buyer", &invoice.buyer_cert, &new.requester)?;

        let id = new.id;
        let request_date = new.request_date.clone();
        if !self.payment_requests.insert(PaymentRequest::new(new)).await? {
            return Err(LedgerError::DuplicateKeyError {
                entity: PaymentRequest::TABLE,
                key: id,
            });
        }

        invoice.record_payment_request(request_date);
        let number = invoice.number;
        if let Err(e) = self.invoices.replace(invoice).await {
            warn!(payment_request = id, invoice = number, error = %e, "invoice update failed after insert");
            return Err(LedgerError::PartialFailureError {
                applied: format!("{} {id} insert", PaymentRequest::TABLE),
                failed: format!("{} {number} update", Invoice::TABLE),
                source: Box::new(e),
            });
        }

        info!(payment_request = id, invoice = number, "payment request created");
        Ok(())
    }

    /// Hands a pending payment request to a payer.
    pub async fn assign_payment_request(
        &self,
        id: i32,
        payer_id: i32,
        payer: IdentityToken,
    ) -> Result<()> {
        let mut request = self.load_payment_request(id).await?;
        if let Err(e) = request.assign(payer_id, payer) {
            warn!(payment_request = id, error = %e, "assignment rejected");
            return Err(e);
        }

        self.payment_requests.replace(request).await?;
        info!(payment_request = id, payer = payer_id, "payment request assigned");
        Ok(())
    }

    /// Returns a payment request to its payer.
    ///
    /// A caller naming the stored payer id is served without identity proof
    /// unless `strict_payment_reads` is set. Any other caller must present the
    /// identity recorded on the request.
    pub async fn payment_info(
        &self,
        id: i32,
        payer_id: i32,
        caller: &IdentityToken,
    ) -> Result<PaymentRequestView> {
        let request = self.load_payment_request(id).await?;

        if self.config.strict_payment_reads || request.payer_id != payer_id {
            if request.payer_cert.is_empty() {
                return Err(LedgerError::InvalidRecordError(format!(
                    "{} {id} has no payer identity",
                    PaymentRequest::TABLE
                )));
            }
            self.authorize("payer", &request.payer_cert, caller)?;
        }

        Ok(request.view())
    }

    async fn load_invoice(&self, number: i32) -> Result<Invoice> {
        let invoice = self
            .invoices
            .lookup(number)
            .await?
            .ok_or(LedgerError::NotFoundError {
                entity: Invoice::TABLE,
                key: number,
            })?;
        invoice.ensure_well_formed()?;
        Ok(invoice)
    }

    async fn load_payment_request(&self, id: i32) -> Result<PaymentRequest> {
        self.payment_requests
            .lookup(id)
            .await?
            .ok_or(LedgerError::NotFoundError {
                entity: PaymentRequest::TABLE,
                key: id,
            })
    }

    fn authorize(
        &self,
        role: &'static str,
        bound: &IdentityToken,
        presented: &IdentityToken,
    ) -> Result<()> {
        if self.verifier.verify(bound, presented) {
            Ok(())
        } else {
            warn!(role, "caller identity rejected");
            Err(LedgerError::AuthorizationError { role })
        }
    }
}
