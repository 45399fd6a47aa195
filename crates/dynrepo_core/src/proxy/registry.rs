//! In-process registry of synthesized repositories.
//!
//! # Responsibility
//! - Make generated implementations discoverable by contract identity.
//! - Reject duplicate or malformed contract ids at registration time.
//!
//! # Invariants
//! - Registration happens during composition, after synthesis and before
//!   call traffic; the registry never re-synthesizes a contract.
//! - Lookups hand out shared handles; the registry keeps no call state.

use crate::proxy::synthesizer::GeneratedRepository;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Registration/lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidContractId(String),
    DuplicateContractId(String),
    ContractNotFound(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContractId(value) => write!(f, "contract id is invalid: {value}"),
            Self::DuplicateContractId(value) => {
                write!(f, "contract id already registered: {value}")
            }
            Self::ContractNotFound(value) => write!(f, "contract not registered: {value}"),
        }
    }
}

impl Error for RegistryError {}

/// Registry keyed by contract id.
#[derive(Default)]
pub struct RepositoryRegistry {
    repositories: BTreeMap<String, Arc<GeneratedRepository>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one synthesized implementation under its contract id.
    pub fn register(&mut self, repository: Arc<GeneratedRepository>) -> Result<(), RegistryError> {
        let contract_id = repository.contract_id().trim().to_string();
        if !is_valid_contract_id(&contract_id) {
            return Err(RegistryError::InvalidContractId(contract_id));
        }
        if self.repositories.contains_key(contract_id.as_str()) {
            return Err(RegistryError::DuplicateContractId(contract_id));
        }

        self.repositories.insert(contract_id, repository);
        Ok(())
    }

    /// Returns one implementation by contract id.
    pub fn get(&self, contract_id: &str) -> Option<Arc<GeneratedRepository>> {
        self.repositories.get(contract_id.trim()).cloned()
    }

    /// Returns one implementation or a `ContractNotFound` error.
    pub fn require(&self, contract_id: &str) -> Result<Arc<GeneratedRepository>, RegistryError> {
        self.get(contract_id)
            .ok_or_else(|| RegistryError::ContractNotFound(contract_id.trim().to_string()))
    }

    /// Returns sorted registered contract ids.
    pub fn contract_ids(&self) -> Vec<String> {
        self.repositories.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

fn is_valid_contract_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
