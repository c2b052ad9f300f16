use crate::domain::access::RoleId;
use crate::domain::events::ContractEvent;
use crate::domain::ports::{CallerIdentity, EventSink, LedgerStore};
use crate::error::PortError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<HashMap<String, Vec<u8>>>>`; clones share the same map,
/// so a test can keep a handle and inspect what the contract wrote.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryLedgerStore {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw bytes stored under `key`.
    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PortError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), PortError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Caller identity fixed at construction, one per invocation.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    role: Option<RoleId>,
}

impl StaticIdentity {
    pub fn new(role: impl Into<RoleId>) -> Self {
        Self {
            role: Some(role.into()),
        }
    }

    /// An identity whose credential cannot be mapped to any role.
    pub fn unresolved() -> Self {
        Self { role: None }
    }
}

#[async_trait]
impl CallerIdentity for StaticIdentity {
    async fn resolve_caller_role(&self) -> Result<RoleId, PortError> {
        self.role
            .clone()
            .ok_or_else(|| "caller presented no organizational credential".into())
    }
}

/// Keeps every emitted event in memory.
#[derive(Default, Clone)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<ContractEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ContractEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: ContractEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_ledger_store() {
        let store = InMemoryLedgerStore::new();
        assert!(store.is_empty().await);

        store.put("S1", b"one".to_vec()).await.unwrap();
        assert_eq!(store.get("S1").await.unwrap(), Some(b"one".to_vec()));
        assert!(store.get("S2").await.unwrap().is_none());

        store.put("S1", b"two".to_vec()).await.unwrap();
        assert_eq!(store.raw("S1").await, Some(b"two".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = InMemoryLedgerStore::new();
        let handle = store.clone();
        store.put("S1", b"x".to_vec()).await.unwrap();
        assert_eq!(handle.raw("S1").await, Some(b"x".to_vec()));
    }

    #[tokio::test]
    async fn test_static_identity() {
        let role = StaticIdentity::new("Org1MSP")
            .resolve_caller_role()
            .await
            .unwrap();
        assert_eq!(role, RoleId::from("Org1MSP"));

        assert!(StaticIdentity::unresolved().resolve_caller_role().await.is_err());
    }

    #[test]
    fn test_recording_event_sink() {
        let sink = RecordingEventSink::new();
        sink.emit(ContractEvent::SubscriptionCompleted {
            subscription_id: "S1".to_string(),
        });
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.events()[0].subscription_id(), "S1");
    }
}
