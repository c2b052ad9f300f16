use crate::domain::ports::LedgerStore;
use crate::error::{ContractError, PortError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding subscription records.
pub const CF_SUBSCRIPTIONS: &str = "subscriptions";

/// A persistent ledger store backed by RocksDB.
///
/// Keys are the UTF-8 bytes of the subscription id; values are the encoded
/// records exactly as handed over by the contract.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBLedgerStore {
    db: Arc<DB>,
}

impl RocksDBLedgerStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "subscriptions" column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_subscriptions = ColumnFamilyDescriptor::new(CF_SUBSCRIPTIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_subscriptions])
            .map_err(|e| ContractError::Io(std::io::Error::other(e)))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn subscriptions(&self) -> std::result::Result<&rocksdb::ColumnFamily, PortError> {
        self.db
            .cf_handle(CF_SUBSCRIPTIONS)
            .ok_or_else(|| "Subscriptions column family not found".into())
    }
}

#[async_trait]
impl LedgerStore for RocksDBLedgerStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, PortError> {
        let cf = self.subscriptions()?;
        Ok(self.db.get_cf(cf, key.as_bytes())?)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> std::result::Result<(), PortError> {
        let cf = self.subscriptions()?;
        self.db.put_cf(cf, key.as_bytes(), value)?;
        Ok(())
    }
}
