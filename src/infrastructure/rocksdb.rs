use crate::domain::invoice::Invoice;
use crate::domain::payment_request::PaymentRequest;
use crate::domain::ports::{InvoiceStore, PaymentRequestStore};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing invoice rows.
pub const CF_INVOICES: &str = "invoices";
/// Column Family for storing payment request rows.
pub const CF_PAYMENT_REQUESTS: &str = "payment_requests";

/// A persistent store implementation using RocksDB.
///
/// Keeps `Invoice` and `PaymentRequest` rows in separate Column Families, keyed
/// by the big-endian primary key and encoded as JSON.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("invoices" and "payment_requests") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_invoices = ColumnFamilyDescriptor::new(CF_INVOICES, Options::default());
        let cf_requests = ColumnFamilyDescriptor::new(CF_PAYMENT_REQUESTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_invoices, cf_requests])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &'static str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LedgerError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn exists(&self, cf_name: &'static str, key: i32) -> Result<bool> {
        let cf = self.cf(cf_name)?;
        Ok(self.db.get_pinned_cf(cf, key.to_be_bytes())?.is_some())
    }

    fn put<T: Serialize>(&self, cf_name: &'static str, key: i32, row: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let value = serde_json::to_vec(row).map_err(|e| {
            LedgerError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, key.to_be_bytes(), value)?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, cf_name: &'static str, key: i32) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key.to_be_bytes())? {
            Some(bytes) => {
                let row = serde_json::from_slice(&bytes).map_err(|e| {
                    LedgerError::InternalError(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Deserialization error: {}", e),
                    )))
                })?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl InvoiceStore for RocksDBStore {
    async fn insert(&self, invoice: Invoice) -> Result<bool> {
        if self.exists(CF_INVOICES, invoice.number)? {
            return Ok(false);
        }
        self.put(CF_INVOICES, invoice.number, &invoice)?;
        Ok(true)
    }

    async fn replace(&self, invoice: Invoice) -> Result<()> {
        if !self.exists(CF_INVOICES, invoice.number)? {
            return Err(LedgerError::NotFoundError {
                entity: Invoice::TABLE,
                key: invoice.number,
            });
        }
        self.put(CF_INVOICES, invoice.number, &invoice)
    }

    async fn lookup(&self, number: i32) -> Result<Option<Invoice>> {
        self.get(CF_INVOICES, number)
    }
}

#[async_trait]
impl PaymentRequestStore for RocksDBStore {
    async fn insert(&self, request: PaymentRequest) -> Result<bool> {
        if self.exists(CF_PAYMENT_REQUESTS, request.id)? {
            return Ok(false);
        }
        self.put(CF_PAYMENT_REQUESTS, request.id, &request)?;
        Ok(true)
    }

    async fn replace(&self, request: PaymentRequest) -> Result<()> {
        if !self.exists(CF_PAYMENT_REQUESTS, request.id)? {
            return Err(LedgerError::NotFoundError {
                entity: PaymentRequest::TABLE,
                key: request.id,
            });
        }
        self.put(CF_PAYMENT_REQUESTS, request.id, &request)
    }

    async fn lookup(&self, id: i32) -> Result<Option<PaymentRequest>> {
        self.get(CF_PAYMENT_REQUESTS, id)
    }
}
