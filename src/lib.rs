//! Recurring-payment subscription contract for a key-value ledger.
//!
//! A payer organization creates subscriptions and records installments; a
//! payee organization confirms and inspects them. The ledger store, the
//! caller's identity and the event channel are injected through the ports in
//! [`domain::ports`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
