use super::access::RoleId;
use super::events::ContractEvent;
use crate::error::PortError;
use async_trait::async_trait;

/// Key-value view of the ledger, scoped to the invoking transaction.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PortError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), PortError>;
}

/// Resolves the organizational role of the current invocation's caller.
#[async_trait]
pub trait CallerIdentity: Send + Sync {
    async fn resolve_caller_role(&self) -> Result<RoleId, PortError>;
}

/// Receives events emitted by the contract.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ContractEvent);
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
pub type EventSinkBox = Box<dyn EventSink>;
