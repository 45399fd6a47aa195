//! Contract metadata records and structural validation.
//!
//! # Responsibility
//! - Define per-method contract records consumed by the proxy synthesizer.
//! - Validate contract structure (names, duplicates) before synthesis.
//!
//! # Invariants
//! - Parameter order in `MethodContract::params` is the call argument order.
//! - Validation rejects duplicates instead of silently shadowing them.

use crate::model::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern must compile")
});

/// Structural contract definition errors. All are fatal at composition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    InvalidMethodName(String),
    InvalidParameterName { method: String, parameter: String },
    DuplicateMethod(String),
    DuplicateParameter { method: String, parameter: String },
}

impl Display for ContractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMethodName(name) => write!(f, "invalid method name: `{name}`"),
            Self::InvalidParameterName { method, parameter } => {
                write!(f, "invalid parameter name `{parameter}` in method `{method}`")
            }
            Self::DuplicateMethod(name) => write!(f, "duplicate method name: `{name}`"),
            Self::DuplicateParameter { method, parameter } => {
                write!(f, "duplicate parameter `{parameter}` in method `{method}`")
            }
        }
    }
}

impl Error for ContractError {}

/// Declared kind for one method parameter.
///
/// Mirrors the `Value` discriminants so generated call paths can check
/// arguments against the declaration instead of inspecting types at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Integer,
    Real,
    Bool,
    Text,
    Sequence,
    Object,
}

impl ParamKind {
    /// Returns whether a call argument satisfies this declared kind.
    ///
    /// `Value::Null` satisfies every declared kind: parameters are nullable
    /// and render as the `null` literal.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (Self::Integer, Value::Integer(_))
                | (Self::Real, Value::Real(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Text, Value::Text(_))
                | (Self::Sequence, Value::Sequence(_))
                | (Self::Object, Value::Object(_))
        )
    }

    /// Returns the kind name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Bool => "bool",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Object => "object",
        }
    }
}

/// One declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Declared result shape of one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnShape {
    /// Multi-row read returning a sequence of row objects.
    Rows,
    /// Single-value read returning the first column of the first row.
    Scalar,
    /// Effect execution returning the affected-row count.
    RowCount,
}

/// Per-method contract record.
///
/// `template` is optional at declaration so manifests can be assembled
/// incrementally; synthesis rejects methods that still lack one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodContract {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub returns: ReturnShape,
    #[serde(default)]
    pub template: Option<String>,
}

impl MethodContract {
    /// Creates a fully-declared method contract.
    pub fn new(
        name: impl Into<String>,
        params: Vec<ParamSpec>,
        returns: ReturnShape,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            template: Some(template.into()),
        }
    }
}

/// One repository contract: identity plus its declared methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryContract {
    pub id: String,
    pub methods: Vec<MethodContract>,
}

impl RepositoryContract {
    pub fn new(id: impl Into<String>, methods: Vec<MethodContract>) -> Self {
        Self {
            id: id.into(),
            methods,
        }
    }

    /// Returns one declared method by name.
    pub fn method(&self, name: &str) -> Option<&MethodContract> {
        self.methods.iter().find(|method| method.name == name)
    }

    /// Validates contract structure: identifier grammar and duplicates.
    ///
    /// # Errors
    /// - `InvalidMethodName` / `InvalidParameterName` for names outside
    ///   `[A-Za-z_][A-Za-z0-9_]*`.
    /// - `DuplicateMethod` / `DuplicateParameter` for repeated declarations.
    pub fn validate(&self) -> Result<(), ContractError> {
        let mut seen_methods = BTreeSet::new();
        for method in &self.methods {
            if !IDENTIFIER_RE.is_match(&method.name) {
                return Err(ContractError::InvalidMethodName(method.name.clone()));
            }
            if !seen_methods.insert(method.name.as_str()) {
                return Err(ContractError::DuplicateMethod(method.name.clone()));
            }

            let mut seen_params = BTreeSet::new();
            for param in &method.params {
                if !IDENTIFIER_RE.is_match(&param.name) {
                    return Err(ContractError::InvalidParameterName {
                        method: method.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
                if !seen_params.insert(param.name.as_str()) {
                    return Err(ContractError::DuplicateParameter {
                        method: method.name.clone(),
                        parameter: param.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Explicit, enumerable list of contracts built at composition time.
///
/// Replaces broad reflective discovery: the composition root declares every
/// contract it wants synthesized, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractManifest {
    contracts: Vec<RepositoryContract>,
}

impl ContractManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one contract, builder style.
    pub fn with_contract(mut self, contract: RepositoryContract) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Returns declared contracts in declaration order.
    pub fn contracts(&self) -> &[RepositoryContract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ContractError, MethodContract, ParamKind, ParamSpec, RepositoryContract, ReturnShape,
    };
    use crate::model::value::Value;

    fn method(name: &str, params: Vec<ParamSpec>) -> MethodContract {
        MethodContract::new(name, params, ReturnShape::Rows, "SELECT 1")
    }

    #[test]
    fn validate_accepts_well_formed_contract() {
        let contract = RepositoryContract::new(
            "user_repository",
            vec![method(
                "find_by_id",
                vec![ParamSpec::new("id", ParamKind::Integer)],
            )],
        );
        contract.validate().expect("contract should validate");
    }

    #[test]
    fn validate_rejects_duplicate_method() {
        let contract = RepositoryContract::new(
            "user_repository",
            vec![method("find", vec![]), method("find", vec![])],
        );
        assert!(matches!(
            contract.validate(),
            Err(ContractError::DuplicateMethod(name)) if name == "find"
        ));
    }

    #[test]
    fn validate_rejects_duplicate_parameter() {
        let contract = RepositoryContract::new(
            "user_repository",
            vec![method(
                "find",
                vec![
                    ParamSpec::new("id", ParamKind::Integer),
                    ParamSpec::new("id", ParamKind::Text),
                ],
            )],
        );
        assert!(matches!(
            contract.validate(),
            Err(ContractError::DuplicateParameter { parameter, .. }) if parameter == "id"
        ));
    }

    #[test]
    fn validate_rejects_bad_identifiers() {
        let contract =
            RepositoryContract::new("user_repository", vec![method("find by id", vec![])]);
        assert!(matches!(
            contract.validate(),
            Err(ContractError::InvalidMethodName(_))
        ));

        let contract = RepositoryContract::new(
            "user_repository",
            vec![method("find", vec![ParamSpec::new("1id", ParamKind::Text)])],
        );
        assert!(matches!(
            contract.validate(),
            Err(ContractError::InvalidParameterName { .. })
        ));
    }

    #[test]
    fn param_kind_accepts_matching_values_and_null() {
        assert!(ParamKind::Integer.accepts(&Value::Integer(1)));
        assert!(ParamKind::Text.accepts(&Value::Null));
        assert!(!ParamKind::Text.accepts(&Value::Integer(1)));
        assert!(ParamKind::Object.accepts(&Value::object(vec![("a", Value::from(1))])));
    }
}
