//! Application layer containing the contract operations.
//!
//! `SubscriptionContract` implements the four operations over the injected
//! ports; `dispatch` maps named invocations with string arguments onto them,
//! the way a ledger host hands transactions to a contract.

pub mod contract;
pub mod dispatch;
