//! Structural validation of untrusted receipt documents
//!
//! Submissions arrive as arbitrary JSON. Validation walks the value
//! depth-first in pre-order and checks every node against its variant
//! schema before anything is persisted; the first violation wins and
//! is reported with the offending node's path.

use serde_json::Value;

use crate::error::ValidationError;
use crate::node::NodeKind;

/// Maximum node nesting accepted by the validator
///
/// Receipts are flat in practice; the bound exists so an adversarial
/// payload cannot drive the recursive walk into stack exhaustion.
pub const MAX_DEPTH: usize = 64;

/// Validate a document submission: a single node or an array of root nodes
///
/// Each root is validated independently, stopping at the first failure.
pub fn validate_document(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Array(roots) => {
            for (i, root) in roots.iter().enumerate() {
                validate_at(root, &format!("$[{i}]"), 0)?;
            }
            Ok(())
        }
        _ => validate_at(value, "$", 0),
    }
}

/// Validate a single node and all of its descendants
pub fn validate_node(value: &Value) -> Result<(), ValidationError> {
    validate_at(value, "$", 0)
}

fn validate_at(value: &Value, path: &str, depth: usize) -> Result<(), ValidationError> {
    if depth >= MAX_DEPTH {
        return Err(ValidationError::DepthLimitExceeded {
            path: path.to_string(),
            limit: MAX_DEPTH,
        });
    }

    let Some(obj) = value.as_object() else {
        return Err(ValidationError::MalformedNode {
            path: path.to_string(),
        });
    };

    let kind = match obj.get("$type") {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingDiscriminator {
                path: path.to_string(),
            });
        }
        Some(Value::String(tag)) if tag.is_empty() => {
            return Err(ValidationError::MissingDiscriminator {
                path: path.to_string(),
            });
        }
        Some(Value::String(tag)) => {
            NodeKind::parse(tag).ok_or_else(|| ValidationError::UnknownVariant {
                path: path.to_string(),
                found: tag.clone(),
            })?
        }
        Some(other) => {
            return Err(ValidationError::UnknownVariant {
                path: path.to_string(),
                found: other.to_string(),
            });
        }
    };

    match kind {
        NodeKind::Alignment => {
            check_enum_field(obj, path, "alignment", &["left", "center", "right"])?;
            validate_children(obj, path, depth)
        }
        NodeKind::Line => {
            if let Some(format) = optional_field(obj, "format") {
                let format = as_object(format, path, "format")?;
                if let Some(font) = optional_field(format, "font") {
                    check_enum_value(font, path, "format.font", &["a", "b", "c"])?;
                }
            }
            validate_children(obj, path, depth)
        }
        NodeKind::Text => {
            check_string_field(obj, path, "value")?;
            if let Some(format) = optional_field(obj, "format") {
                validate_text_format(format, path)?;
            }
            Ok(())
        }
        NodeKind::QrCode => check_string_field(obj, path, "value"),
        // No declared fields beyond the discriminator
        NodeKind::Cut | NodeKind::Newline => Ok(()),
    }
}

/// `children` must be present and an array; then recurse into each element
fn validate_children(
    obj: &serde_json::Map<String, Value>,
    path: &str,
    depth: usize,
) -> Result<(), ValidationError> {
    let Some(Value::Array(children)) = obj.get("children") else {
        return Err(ValidationError::InvalidChildren {
            path: path.to_string(),
        });
    };
    for (i, child) in children.iter().enumerate() {
        validate_at(child, &format!("{path}.children[{i}]"), depth + 1)?;
    }
    Ok(())
}

fn validate_text_format(format: &Value, path: &str) -> Result<(), ValidationError> {
    let format = as_object(format, path, "format")?;

    if let Some(size) = optional_field(format, "size") {
        let positive = size.as_f64().is_some_and(|v| v > 0.0);
        if !positive {
            return Err(constraint(path, "format.size", "must be a positive number"));
        }
    }
    if let Some(bold) = optional_field(format, "bold")
        && !bold.is_boolean()
    {
        return Err(constraint(path, "format.bold", "must be a boolean"));
    }
    if let Some(italic) = optional_field(format, "italic")
        && !italic.is_boolean()
    {
        return Err(constraint(path, "format.italic", "must be a boolean"));
    }
    if let Some(underline) = optional_field(format, "underline") {
        let ok = underline.is_boolean() || underline.as_f64() == Some(2.0);
        if !ok {
            return Err(constraint(path, "format.underline", "must be a boolean or 2"));
        }
    }
    Ok(())
}

/// Optional fields may be omitted or explicitly null
fn optional_field<'a>(obj: &'a serde_json::Map<String, Value>, field: &str) -> Option<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn as_object<'a>(
    value: &'a Value,
    path: &str,
    field: &'static str,
) -> Result<&'a serde_json::Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| constraint(path, field, "must be an object"))
}

fn check_string_field(
    obj: &serde_json::Map<String, Value>,
    path: &str,
    field: &'static str,
) -> Result<(), ValidationError> {
    match obj.get(field) {
        Some(Value::String(_)) => Ok(()),
        _ => Err(constraint(path, field, "must be a string")),
    }
}

fn check_enum_field(
    obj: &serde_json::Map<String, Value>,
    path: &str,
    field: &'static str,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match obj.get(field) {
        Some(value) => check_enum_value(value, path, field, allowed),
        None => Err(constraint_for(path, field, allowed)),
    }
}

fn check_enum_value(
    value: &Value,
    path: &str,
    field: &'static str,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(constraint_for(path, field, allowed)),
    }
}

fn constraint(path: &str, field: &'static str, constraint: &'static str) -> ValidationError {
    ValidationError::FieldConstraintViolation {
        path: path.to_string(),
        field,
        constraint,
    }
}

fn constraint_for(path: &str, field: &'static str, allowed: &[&str]) -> ValidationError {
    // The three enum fields each have a fixed allowed set; keep the
    // constraint text static so the error stays Copy-free and cheap.
    let text = match allowed {
        ["left", "center", "right"] => "must be one of: left, center, right",
        ["a", "b", "c"] => "must be one of: a, b, c",
        _ => "has an invalid value",
    };
    constraint(path, field, text)
}
