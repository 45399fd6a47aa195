//! Template substitution engine.
//!
//! # Responsibility
//! - Turn `(template, parameter environment)` into literal SQL text.
//! - Enforce the INSERT-only rule for whole-object row expansion.
//!
//! # Invariants
//! - Identical repeated token spellings receive one uniform substitution.
//! - Distinct tokens substitute longest-first, so a token that is a prefix
//!   of another cannot corrupt it.
//! - Either every discovered token resolves or the render fails; the
//!   executor never sees partially substituted text.

use crate::model::value::Value;
use crate::render::env::ParamEnv;
use crate::render::placeholder::{discover, is_insert_shaped, parse, Placeholder};
use crate::render::{RenderError, RenderResult};

/// Literal SQL text with zero remaining placeholder markers.
///
/// Produced per call and consumed immediately by an executor; not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuery(String);

impl RenderedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RenderedQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RenderedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders one template against a per-call parameter environment.
///
/// A template with no placeholder tokens renders to itself for every
/// environment.
///
/// # Errors
/// - `ParameterNotFound` / `PropertyNotFound` for environment mismatches.
/// - `UnsupportedPropertyType` for value shapes with no literal form in the
///   requested position (nested sequences/objects).
/// - `MalformedTemplate` for grammar violations and for object expansion
///   outside an INSERT-shaped template.
/// - `UnresolvedPlaceholder` when a token survives substitution; this is a
///   render defect, reported instead of handing broken SQL onward.
pub fn render(template: &str, env: &ParamEnv) -> RenderResult<RenderedQuery> {
    let insert_shaped = is_insert_shaped(template);
    let mut tokens = discover(template);
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut rendered = template.to_string();
    for raw in &tokens {
        let placeholder = parse(raw)?;
        let literal = match placeholder.property.as_deref() {
            Some(property) => property_literal(&placeholder, property, env)?,
            None => root_literal(&placeholder, env, insert_shaped)?,
        };
        rendered = rendered.replace(raw.as_str(), &literal);
    }

    for survivor in discover(&rendered) {
        if tokens.contains(&survivor) {
            return Err(RenderError::UnresolvedPlaceholder(survivor));
        }
    }

    Ok(RenderedQuery(rendered))
}

fn root_literal(
    placeholder: &Placeholder,
    env: &ParamEnv,
    insert_shaped: bool,
) -> RenderResult<String> {
    let value = env
        .get(&placeholder.root)
        .ok_or_else(|| RenderError::ParameterNotFound(placeholder.root.clone()))?;

    match value {
        Value::Sequence(items) => sequence_literal(placeholder, items),
        Value::Object(fields) => {
            if !insert_shaped {
                return Err(RenderError::MalformedTemplate(format!(
                    "placeholder `{}` expands an object outside an INSERT template",
                    placeholder.raw
                )));
            }
            insert_row_literal(placeholder, fields)
        }
        scalar => scalar_literal(placeholder, scalar),
    }
}

fn property_literal(
    placeholder: &Placeholder,
    property: &str,
    env: &ParamEnv,
) -> RenderResult<String> {
    let value = env
        .get(&placeholder.root)
        .ok_or_else(|| RenderError::ParameterNotFound(placeholder.root.clone()))?;

    let field = value
        .field(property)
        .ok_or_else(|| RenderError::PropertyNotFound {
            parameter: placeholder.root.clone(),
            property: property.to_string(),
        })?;

    scalar_literal(placeholder, field)
}

fn sequence_literal(placeholder: &Placeholder, items: &[Value]) -> RenderResult<String> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(scalar_literal(placeholder, item)?);
    }
    Ok(format!("({})", rendered.join(",")))
}

fn insert_row_literal(
    placeholder: &Placeholder,
    fields: &[(String, Value)],
) -> RenderResult<String> {
    let mut rendered = Vec::with_capacity(fields.len());
    for (_, field) in fields {
        rendered.push(scalar_literal(placeholder, field)?);
    }
    Ok(rendered.join(","))
}

/// Renders one scalar position. Nesting stops here: sequence or object
/// values inside a property, list element or INSERT field are rejected.
fn scalar_literal(placeholder: &Placeholder, value: &Value) -> RenderResult<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Integer(number) => Ok(number.to_string()),
        Value::Real(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Text(text) => Ok(quoted_text(text)),
        Value::Sequence(_) | Value::Object(_) => Err(RenderError::UnsupportedPropertyType {
            placeholder: placeholder.raw.clone(),
            kind: value.kind_name(),
        }),
    }
}

/// Single-quotes a text literal, doubling embedded single quotes.
fn quoted_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
