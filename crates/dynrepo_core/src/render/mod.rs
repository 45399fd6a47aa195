//! Query template rendering: placeholders in, literal SQL out.
//!
//! # Responsibility
//! - Discover `:name` / `:name.property` placeholder tokens in a template.
//! - Substitute literals drawn from a per-call parameter environment.
//!
//! # Invariants
//! - Rendering either returns a fully substituted query or fails; no
//!   partially rendered text ever reaches an executor.
//! - Text literals are single-quoted with embedded quotes escaped.
//! - The renderer holds no shared state and is safe to call concurrently.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod env;
pub mod placeholder;
pub mod template;

pub use env::ParamEnv;
pub use template::{render, RenderedQuery};

pub type RenderResult<T> = Result<T, RenderError>;

/// Render-time failures caused by a template/argument mismatch.
///
/// All variants are surfaced to the caller as a failed call; none are
/// retryable and none produce partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Placeholder root has no entry in the parameter environment.
    ParameterNotFound(String),
    /// Placeholder property missing, or the root value is not an object.
    PropertyNotFound { parameter: String, property: String },
    /// Value shape that has no literal form in this position.
    UnsupportedPropertyType {
        placeholder: String,
        kind: &'static str,
    },
    /// Token violates the placeholder grammar, or an object expansion was
    /// requested outside an INSERT-shaped template.
    MalformedTemplate(String),
    /// A discovered token survived substitution. Indicates a defect in the
    /// render pass itself, not a recoverable caller state.
    UnresolvedPlaceholder(String),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParameterNotFound(name) => {
                write!(f, "parameter `{name}` not found in call environment")
            }
            Self::PropertyNotFound {
                parameter,
                property,
            } => write!(f, "property `{property}` not found on parameter `{parameter}`"),
            Self::UnsupportedPropertyType { placeholder, kind } => {
                write!(f, "placeholder `{placeholder}` cannot render a {kind} value here")
            }
            Self::MalformedTemplate(message) => write!(f, "malformed template: {message}"),
            Self::UnresolvedPlaceholder(token) => {
                write!(f, "placeholder `{token}` left unresolved after substitution")
            }
        }
    }
}

impl Error for RenderError {}
