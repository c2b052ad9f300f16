use crate::error::{ContractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Organizational role token of the default paying party.
pub const PAYER_ROLE: &str = "Org1MSP";
/// Organizational role token of the default receiving party.
pub const PAYEE_ROLE: &str = "Org2MSP";

/// An organizational role identifier as produced by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RoleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The operations exposed by the subscription contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Pay,
    Confirm,
    Query,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Pay,
        Operation::Confirm,
        Operation::Query,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Pay => "pay",
            Operation::Confirm => "confirm",
            Operation::Query => "query",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps each operation to the single role allowed to invoke it.
///
/// An operation with no entry is denied to every caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    required: HashMap<Operation, RoleId>,
}

impl AccessPolicy {
    /// Builds the standard two-party policy: the payer creates and pays,
    /// the payee confirms and queries.
    pub fn two_party(payer: impl Into<RoleId>, payee: impl Into<RoleId>) -> Self {
        let payer = payer.into();
        let payee = payee.into();
        Self::from_map(HashMap::from([
            (Operation::Create, payer.clone()),
            (Operation::Pay, payer),
            (Operation::Confirm, payee.clone()),
            (Operation::Query, payee),
        ]))
    }

    pub fn from_map(required: HashMap<Operation, RoleId>) -> Self {
        Self { required }
    }

    pub fn required_role(&self, operation: Operation) -> Option<&RoleId> {
        self.required.get(&operation)
    }

    /// Fails closed unless `caller` is exactly the role required for `operation`.
    pub fn authorize(&self, operation: Operation, caller: &RoleId) -> Result<()> {
        match self.required.get(&operation) {
            Some(required) if required == caller => Ok(()),
            Some(required) => Err(ContractError::Unauthorized {
                operation,
                required: required.clone(),
                caller: caller.clone(),
            }),
            None => Err(ContractError::Unauthorized {
                operation,
                required: RoleId::new("<none>"),
                caller: caller.clone(),
            }),
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::two_party(PAYER_ROLE, PAYEE_ROLE)
    }
}
