use crate::domain::access::{Operation, RoleId};
use thiserror::Error;

/// Error type returned by collaborator ports (store, identity).
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("failed to resolve caller identity")]
    IdentityResolutionFailed(#[source] PortError),
    #[error("{operation} requires role {required}, caller is {caller}")]
    Unauthorized {
        operation: Operation,
        required: RoleId,
        caller: RoleId,
    },
    #[error("subscription {0} not found")]
    NotFound(String),
    #[error("subscription {0} already exists")]
    AlreadyExists(String),
    #[error("failed to decode subscription {key}: {source}")]
    DeserializationFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode subscription {key}: {source}")]
    SerializationFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("subscription {0} is already completed")]
    AlreadyCompleted(String),
    #[error("subscription {0} has no remaining installments")]
    NoRemainingInstallments(String),
    #[error("failed to read {key} from ledger")]
    StoreReadFailed {
        key: String,
        #[source]
        source: PortError,
    },
    #[error("failed to write {key} to ledger")]
    StoreWriteFailed {
        key: String,
        #[source]
        source: PortError,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContractError>;
