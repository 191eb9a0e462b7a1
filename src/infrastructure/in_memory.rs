use crate::domain::invoice::Invoice;
use crate::domain::payment_request::PaymentRequest;
use crate::domain::ports::{InvoiceStore, PaymentRequestStore};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory invoice table.
///
/// Uses `Arc<RwLock<HashMap<i32, Invoice>>>` so clones share the same rows.
/// Suited to tests and single-run command-line sessions.
#[derive(Default, Clone)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<i32, Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Creates a new, empty in-memory invoice store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: Invoice) -> Result<bool> {
        let mut invoices = self.invoices.write().await;
        match invoices.entry(invoice.number) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(invoice);
                Ok(true)
            }
        }
    }

    async fn replace(&self, invoice: Invoice) -> Result<()> {
        let mut invoices = self.invoices.write().await;
        match invoices.get_mut(&invoice.number) {
            Some(row) => {
                *row = invoice;
                Ok(())
            }
            None => Err(LedgerError::NotFoundError {
                entity: Invoice::TABLE,
                key: invoice.number,
            }),
        }
    }

    async fn lookup(&self, number: i32) -> Result<Option<Invoice>> {
        let invoices = self.invoices.read().await;
        Ok(invoices.get(&number).cloned())
    }
}

/// A thread-safe in-memory payment request table.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRequestStore {
    requests: Arc<RwLock<HashMap<i32, PaymentRequest>>>,
}

impl InMemoryPaymentRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRequestStore for InMemoryPaymentRequestStore {
    async fn insert(&self, request: PaymentRequest) -> Result<bool> {
        let mut requests = self.requests.write().await;
        match requests.entry(request.id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(request);
                Ok(true)
            }
        }
    }

    async fn replace(&self, request: PaymentRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&request.id) {
            Some(row) => {
                *row = request;
                Ok(())
            }
            None => Err(LedgerError::NotFoundError {
                entity: PaymentRequest::TABLE,
                key: request.id,
            }),
        }
    }

    async fn lookup(&self, id: i32) -> Result<Option<PaymentRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::IdentityToken;
    use crate::domain::invoice::NewInvoice;
    use crate::domain::payment_request::NewPaymentRequest;

    fn invoice(number: i32, price: i32) -> Invoice {
        Invoice::new(NewInvoice::new(
            number,
            price,
            "2024-01-01",
            10,
            20,
            IdentityToken::new(b"S".to_vec()),
            IdentityToken::new(b"B".to_vec()),
        ))
    }

    #[tokio::test]
    async fn test_in_memory_invoice_store() {
        let store = InMemoryInvoiceStore::new();
        let row = invoice(1, 100);

        assert!(store.insert(row.clone()).await.unwrap());
        let retrieved = store.lookup(1).await.unwrap().unwrap();
        assert_eq!(retrieved, row);

        assert!(store.lookup(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_existing_key_keeps_original() {
        let store = InMemoryInvoiceStore::new();
        assert!(store.insert(invoice(1, 100)).await.unwrap());
        assert!(!store.insert(invoice(1, 999)).await.unwrap());

        assert_eq!(store.lookup(1).await.unwrap().unwrap().price, 100);
    }

    #[tokio::test]
    async fn test_replace_requires_existing_row() {
        let store = InMemoryInvoiceStore::new();
        let result = store.replace(invoice(7, 1)).await;
        assert!(matches!(
            result,
            Err(LedgerError::NotFoundError { key: 7, .. })
        ));

        store.insert(invoice(7, 1)).await.unwrap();
        let mut row = invoice(7, 1);
        row.approve();
        store.replace(row.clone()).await.unwrap();
        assert_eq!(store.lookup(7).await.unwrap().unwrap(), row);
    }

    #[tokio::test]
    async fn test_in_memory_payment_request_store() {
        let store = InMemoryPaymentRequestStore::new();
        let request = PaymentRequest::new(NewPaymentRequest {
            id: 5,
            invoice: 1,
            discount_rate: 3,
            request_date: "2024-02-01".to_string(),
            requester: IdentityToken::new(b"B".to_vec()),
        });

        assert!(store.insert(request.clone()).await.unwrap());
        assert!(!store.insert(request.clone()).await.unwrap());
        assert_eq!(store.lookup(5).await.unwrap().unwrap(), request);

        let mut assigned = request.clone();
        assigned.assign(99, IdentityToken::new(b"P".to_vec())).unwrap();
        store.replace(assigned.clone()).await.unwrap();
        assert_eq!(store.lookup(5).await.unwrap().unwrap(), assigned);
    }
}
