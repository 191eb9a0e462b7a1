use super::identity::IdentityToken;
use super::invoice::Invoice;
use super::payment_request::PaymentRequest;
use crate::error::Result;
use async_trait::async_trait;

/// Keyed table of invoices. `insert` returns `false` when the number is taken.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, invoice: Invoice) -> Result<bool>;
    async fn replace(&self, invoice: Invoice) -> Result<()>;
    async fn lookup(&self, number: i32) -> Result<Option<Invoice>>;
}

/// Keyed table of payment requests. `insert` returns `false` when the id is taken.
#[async_trait]
pub trait PaymentRequestStore: Send + Sync {
    async fn insert(&self, request: PaymentRequest) -> Result<bool>;
    async fn replace(&self, request: PaymentRequest) -> Result<()>;
    async fn lookup(&self, id: i32) -> Result<Option<PaymentRequest>>;
}

/// Supplies the identity the host bound to the current caller.
pub trait IdentityOracle: Send + Sync {
    fn current_caller_identity(&self) -> Result<IdentityToken>;
}

pub type InvoiceStoreBox = Box<dyn InvoiceStore>;
pub type PaymentRequestStoreBox = Box<dyn PaymentRequestStore>;
