#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: issue and approve an invoice
    let first = common::operations_file(&[
        "createInvoice, 1, 100, 2024-01-01, 10, 20, Uw==, Qg==",
        "approveInvoice, 1, Qg==",
    ])
    .unwrap();

    let output1 = Command::new(cargo_bin!("invoice-ledger"))
        .arg(first.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());

    // 2. Second run against the same DB sees the approved invoice
    let second = common::operations_file(&[
        "createInvoice, 1, 100, 2024-01-01, 10, 20, Uw==, Qg==",
        "createPaymentRequest, 5, 1, 3, 2024-02-01, Qg==",
        "invoice_info, 1, Qg==",
    ])
    .unwrap();

    let output2 = Command::new(cargo_bin!("invoice-ledger"))
        .arg(second.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());

    let replies = common::replies(&output2.stdout);
    assert_eq!(replies[0]["error"]["code"], "DUPLICATE_KEY");
    assert_eq!(replies[1]["result"], "ack");
    assert_eq!(replies[2]["result"]["status"], "Approved");
    assert_eq!(replies[2]["result"]["requestDate"], "2024-02-01");
}
