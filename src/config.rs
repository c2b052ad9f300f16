use crate::application::contract::CreateMode;
use crate::domain::access::{AccessPolicy, Operation, PAYEE_ROLE, PAYER_ROLE, RoleId};
use crate::error::{ContractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Contract settings supplied by the host.
///
/// Loaded from a JSON file such as:
///
/// ```json
/// {
///   "roles": { "create": "Org1MSP", "pay": "Org1MSP", "confirm": "Org2MSP", "query": "Org2MSP" },
///   "createMode": "reject-existing"
/// }
/// ```
///
/// Omitted keys fall back to the two-party defaults. Every operation must end
/// up with a role; an empty role string is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContractConfig {
    #[serde(default = "default_roles")]
    pub roles: HashMap<Operation, RoleId>,
    #[serde(default)]
    pub create_mode: CreateMode,
}

fn default_roles() -> HashMap<Operation, RoleId> {
    HashMap::from([
        (Operation::Create, RoleId::from(PAYER_ROLE)),
        (Operation::Pay, RoleId::from(PAYER_ROLE)),
        (Operation::Confirm, RoleId::from(PAYEE_ROLE)),
        (Operation::Query, RoleId::from(PAYEE_ROLE)),
    ])
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            create_mode: CreateMode::default(),
        }
    }
}

impl ContractConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw).map_err(|e| match e {
            ContractError::Config(msg) => {
                ContractError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: ContractConfig =
            serde_json::from_str(raw).map_err(|e| ContractError::Config(e.to_string()))?;

        for (operation, role) in default_roles() {
            config.roles.entry(operation).or_insert(role);
        }
        config.validate()?;
        Ok(config)
    }

    /// Replaces the payer-side roles (create, pay).
    pub fn with_payer_role(mut self, role: impl Into<RoleId>) -> Self {
        let role = role.into();
        self.roles.insert(Operation::Create, role.clone());
        self.roles.insert(Operation::Pay, role);
        self
    }

    /// Replaces the payee-side roles (confirm, query).
    pub fn with_payee_role(mut self, role: impl Into<RoleId>) -> Self {
        let role = role.into();
        self.roles.insert(Operation::Confirm, role.clone());
        self.roles.insert(Operation::Query, role);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for operation in Operation::ALL {
            match self.roles.get(&operation) {
                Some(role) if !role.as_str().trim().is_empty() => {}
                _ => {
                    return Err(ContractError::Config(format!(
                        "no role configured for {}",
                        operation
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::from_map(self.roles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_two_party_policy() {
        let config = ContractConfig::default();
        assert_eq!(config.access_policy(), AccessPolicy::default());
        assert_eq!(config.create_mode, CreateMode::Overwrite);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config =
            ContractConfig::from_json(r#"{"roles":{"query":"Auditor"},"createMode":"reject-existing"}"#)
                .unwrap();
        assert_eq!(config.create_mode, CreateMode::RejectExisting);
        assert_eq!(config.roles[&Operation::Query], RoleId::from("Auditor"));
        assert_eq!(config.roles[&Operation::Confirm], RoleId::from(PAYEE_ROLE));
        assert_eq!(config.roles[&Operation::Create], RoleId::from(PAYER_ROLE));
    }

    #[test]
    fn test_empty_role_rejected() {
        let result = ContractConfig::from_json(r#"{"roles":{"pay":" "}}"#);
        assert!(matches!(result, Err(ContractError::Config(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ContractConfig::from_json(r#"{"mode":"fast"}"#);
        assert!(matches!(result, Err(ContractError::Config(_))));
    }

    #[test]
    fn test_role_overrides() {
        let config = ContractConfig::default()
            .with_payer_role("BankA")
            .with_payee_role("BankB");
        assert_eq!(config.access_policy(), AccessPolicy::two_party("BankA", "BankB"));
    }

    #[test]
    fn test_role_overrides_from_owned_strings() {
        let config = ContractConfig::default()
            .with_payer_role(String::from("BankA"))
            .with_payee_role(String::from("BankB"));
        assert_eq!(config.roles[&Operation::Pay], RoleId::from("BankA"));
        assert_eq!(config.roles[&Operation::Query], RoleId::from("BankB"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"createMode":"overwrite"}}"#).unwrap();
        let config = ContractConfig::load(file.path()).unwrap();
        assert_eq!(config, ContractConfig::default());
    }
}
