//! Entities, their transition rules, and the ports the engine depends on.

pub mod identity;
pub mod invoice;
pub mod payment_request;
pub mod ports;
