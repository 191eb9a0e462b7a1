//! Adapters for the domain ports.

pub mod identity;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
