//! Invoice and payment request lifecycle engine for a two-party trade-finance
//! ledger.
//!
//! A supplier issues an [`Invoice`](domain::invoice::Invoice) against a buyer,
//! the buyer approves it and raises a
//! [`PaymentRequest`](domain::payment_request::PaymentRequest), and a third-party
//! payer claims the request. All state lives behind the store ports in
//! [`domain::ports`]; the [`LifecycleEngine`](application::engine::LifecycleEngine)
//! enforces transitions and identity-based authorization on top of them.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
