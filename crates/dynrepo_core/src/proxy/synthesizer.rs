//! Repository proxy synthesizer and generated call dispatch.
//!
//! # Responsibility
//! - Validate a contract and compile it into a callable repository.
//! - Dispatch calls: build the parameter environment, render the template,
//!   delegate to the executor.
//!
//! # Invariants
//! - Every method is fully checked at synthesis (template present,
//!   placeholder grammar valid, every placeholder root declared).
//! - Each call owns its environment and rendered query; two synthesized
//!   instances of one contract render identical SQL for identical
//!   arguments.

use crate::contract::{ContractError, ParamKind, ParamSpec, RepositoryContract, ReturnShape};
use crate::exec::{ExecError, ExecOutcome, QueryExecutor};
use crate::model::value::Value;
use crate::render::env::ParamEnv;
use crate::render::placeholder::{discover, parse};
use crate::render::template::{render, RenderedQuery};
use crate::render::RenderError;
use log::{debug, error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Startup-phase contract compilation errors. All are fatal: a process with
/// a malformed contract must not begin serving calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    Contract(ContractError),
    MissingTemplate {
        contract: String,
        method: String,
    },
    MalformedPlaceholder {
        contract: String,
        method: String,
        detail: String,
    },
    UnboundPlaceholder {
        contract: String,
        method: String,
        placeholder: String,
    },
}

impl Display for SynthesisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contract(err) => write!(f, "{err}"),
            Self::MissingTemplate { contract, method } => {
                write!(f, "method `{contract}.{method}` declares no query template")
            }
            Self::MalformedPlaceholder {
                contract,
                method,
                detail,
            } => write!(f, "template of `{contract}.{method}` is malformed: {detail}"),
            Self::UnboundPlaceholder {
                contract,
                method,
                placeholder,
            } => write!(
                f,
                "template of `{contract}.{method}` references `{placeholder}` which is not a declared parameter"
            ),
        }
    }
}

impl Error for SynthesisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contract(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContractError> for SynthesisError {
    fn from(value: ContractError) -> Self {
        Self::Contract(value)
    }
}

pub type CallResult<T> = Result<T, CallError>;

/// Call-time failures of a generated repository method.
#[derive(Debug)]
pub enum CallError {
    /// Dispatch key does not name a synthesized method.
    UnknownMethod { contract: String, method: String },
    /// Argument count differs from the declaration. Defensive: call sites
    /// generated from the same metadata cannot trigger this.
    ArityMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },
    /// Argument value shape differs from the declared parameter kind.
    ParameterKindMismatch {
        method: String,
        parameter: String,
        expected: ParamKind,
        actual: &'static str,
    },
    Render(RenderError),
    Exec(ExecError),
}

impl Display for CallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMethod { contract, method } => {
                write!(f, "contract `{contract}` has no method `{method}`")
            }
            Self::ArityMismatch {
                method,
                expected,
                actual,
            } => write!(
                f,
                "method `{method}` takes {expected} argument(s), got {actual}"
            ),
            Self::ParameterKindMismatch {
                method,
                parameter,
                expected,
                actual,
            } => write!(
                f,
                "method `{method}` parameter `{parameter}` expects {} value, got {actual}",
                expected.name()
            ),
            Self::Render(err) => write!(f, "{err}"),
            Self::Exec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Exec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RenderError> for CallError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<ExecError> for CallError {
    fn from(value: ExecError) -> Self {
        Self::Exec(value)
    }
}

/// One fully validated method, ready for dispatch.
#[derive(Debug, Clone)]
struct CompiledMethod {
    params: Vec<ParamSpec>,
    returns: ReturnShape,
    template: String,
}

/// Callable implementation synthesized from one repository contract.
///
/// Stateless beyond its executor handle; safe for concurrent use since each
/// call owns its parameter environment and rendered query.
pub struct GeneratedRepository {
    contract_id: String,
    methods: BTreeMap<String, CompiledMethod>,
    executor: Arc<dyn QueryExecutor>,
}

impl fmt::Debug for GeneratedRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedRepository")
            .field("contract_id", &self.contract_id)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

impl GeneratedRepository {
    /// Returns the contract identity this implementation was built from.
    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Returns synthesized method names, sorted.
    pub fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    /// Renders the SQL a call with these arguments would execute.
    ///
    /// Used by the call path itself and by callers that want the literal
    /// query without touching the executor.
    pub fn render_call(&self, method: &str, args: &[Value]) -> CallResult<RenderedQuery> {
        let compiled = self.compiled(method)?;

        if compiled.params.len() != args.len() {
            return Err(CallError::ArityMismatch {
                method: method.to_string(),
                expected: compiled.params.len(),
                actual: args.len(),
            });
        }
        for (spec, arg) in compiled.params.iter().zip(args) {
            if !spec.kind.accepts(arg) {
                return Err(CallError::ParameterKindMismatch {
                    method: method.to_string(),
                    parameter: spec.name.clone(),
                    expected: spec.kind,
                    actual: arg.kind_name(),
                });
            }
        }

        let env: ParamEnv = compiled
            .params
            .iter()
            .zip(args)
            .map(|(spec, arg)| (spec.name.clone(), arg.clone()))
            .collect();

        Ok(render(&compiled.template, &env)?)
    }

    /// Executes one method call: environment, render, execute.
    ///
    /// The executor outcome is returned unchanged; executor failures pass
    /// through unmodified.
    pub fn call(&self, method: &str, args: &[Value]) -> CallResult<ExecOutcome> {
        let call_id = Uuid::new_v4();
        let query = match self.render_call(method, args) {
            Ok(query) => {
                debug!(
                    "event=query_render module=proxy status=ok contract={} method={method} call_id={call_id} sql={query}",
                    self.contract_id
                );
                query
            }
            Err(err) => {
                error!(
                    "event=query_render module=proxy status=error contract={} method={method} call_id={call_id} error={err}",
                    self.contract_id
                );
                return Err(err);
            }
        };

        let returns = self.compiled(method)?.returns;
        self.executor
            .execute(query.as_str(), returns)
            .map_err(CallError::from)
    }

    fn compiled(&self, method: &str) -> CallResult<&CompiledMethod> {
        self.methods.get(method).ok_or_else(|| CallError::UnknownMethod {
            contract: self.contract_id.clone(),
            method: method.to_string(),
        })
    }
}

/// Synthesizes one callable implementation from contract metadata.
///
/// Runs once per contract during single-threaded startup, before call
/// traffic. Synthesizing the same metadata again yields an independent
/// implementation with identical rendering behavior.
///
/// # Errors
/// - `Contract` for structural defects (duplicates, bad identifiers).
/// - `MissingTemplate` for a method without a template.
/// - `MalformedPlaceholder` / `UnboundPlaceholder` for template tokens that
///   cannot resolve against the declaration.
pub fn synthesize(
    contract: &RepositoryContract,
    executor: Arc<dyn QueryExecutor>,
) -> SynthesisResult<GeneratedRepository> {
    contract.validate()?;

    let mut methods = BTreeMap::new();
    for method in &contract.methods {
        let template = method.template.as_deref().ok_or_else(|| {
            SynthesisError::MissingTemplate {
                contract: contract.id.clone(),
                method: method.name.clone(),
            }
        })?;

        for raw in discover(template) {
            let placeholder =
                parse(&raw).map_err(|err| SynthesisError::MalformedPlaceholder {
                    contract: contract.id.clone(),
                    method: method.name.clone(),
                    detail: err.to_string(),
                })?;
            let declared = method
                .params
                .iter()
                .any(|param| param.name == placeholder.root);
            if !declared {
                return Err(SynthesisError::UnboundPlaceholder {
                    contract: contract.id.clone(),
                    method: method.name.clone(),
                    placeholder: placeholder.raw,
                });
            }
        }

        methods.insert(
            method.name.clone(),
            CompiledMethod {
                params: method.params.clone(),
                returns: method.returns,
                template: template.to_string(),
            },
        );
    }

    info!(
        "event=synthesis module=proxy status=ok contract={} methods={}",
        contract.id,
        methods.len()
    );

    Ok(GeneratedRepository {
        contract_id: contract.id.clone(),
        methods,
        executor,
    })
}
