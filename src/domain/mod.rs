//! Domain layer: the subscription record, its access policy, events and the
//! ports through which the contract reaches the ledger host.

pub mod access;
pub mod events;
pub mod ports;
pub mod subscription;
