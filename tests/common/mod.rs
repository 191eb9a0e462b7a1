#![allow(dead_code)]

use invoice_ledger::application::engine::LifecycleEngine;
use invoice_ledger::config::EngineConfig;
use invoice_ledger::domain::identity::IdentityToken;
use invoice_ledger::domain::invoice::NewInvoice;
use invoice_ledger::domain::payment_request::NewPaymentRequest;
use invoice_ledger::infrastructure::in_memory::{InMemoryInvoiceStore, InMemoryPaymentRequestStore};
use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub fn engine() -> LifecycleEngine {
    LifecycleEngine::new(
        Box::new(InMemoryInvoiceStore::new()),
        Box::new(InMemoryPaymentRequestStore::new()),
        EngineConfig::default(),
    )
}

pub fn identity(bytes: &[u8]) -> IdentityToken {
    IdentityToken::new(bytes.to_vec())
}

pub fn random_identity() -> IdentityToken {
    IdentityToken::new(rand::random::<[u8; 32]>().to_vec())
}

pub fn invoice(number: i32, supplier: &IdentityToken, buyer: &IdentityToken) -> NewInvoice {
    NewInvoice::new(
        number,
        100,
        "2024-01-01",
        10,
        20,
        supplier.clone(),
        buyer.clone(),
    )
}

pub fn payment_request(id: i32, invoice: i32, requester: &IdentityToken) -> NewPaymentRequest {
    NewPaymentRequest {
        id,
        invoice,
        discount_rate: 3,
        request_date: "2024-02-01".to_string(),
        requester: requester.clone(),
    }
}

/// Writes operation lines to a temporary CSV file.
pub fn operations_file(lines: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()?;
    Ok(file)
}

/// Parses each stdout line of the binary as a JSON reply.
pub fn replies(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("reply is not JSON"))
        .collect()
}
