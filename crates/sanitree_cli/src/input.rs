//! Loading input trees from JSON.
//!
//! The accepted shape mirrors the serialized form of [`DomNode`]:
//!
//! ```json
//! { "type": "element", "name": "p", "attributes": { "class": "x" }, "children": [
//!     { "type": "text", "value": "hello" },
//!     { "type": "comment", "value": "note" }
//! ] }
//! ```
//!
//! `attributes` and `children` are optional. Nesting is bounded by
//! `serde_json`'s recursion limit, which also bounds the recursion here.

use sanitree_ast::{DomArena, DomNode};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid node at {path}: {message}")]
    Shape { path: String, message: String },
}

impl InputError {
    fn shape(path: &str, message: impl Into<String>) -> Self {
        Self::Shape {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Parses `json` and allocates the tree in `arena`.
pub fn parse_document<'a>(arena: &'a DomArena, json: &str) -> Result<DomNode<'a>, InputError> {
    let value: Value = serde_json::from_str(json)?;
    build_node(arena, &value, "$")
}

fn build_node<'a>(
    arena: &'a DomArena,
    value: &Value,
    path: &str,
) -> Result<DomNode<'a>, InputError> {
    let Value::Object(object) = value else {
        return Err(InputError::shape(path, "expected an object"));
    };

    match string_field(object, "type", path)? {
        "element" => build_element(arena, object, path),
        "text" => Ok(arena.text(string_field(object, "value", path)?)),
        "comment" => Ok(arena.comment(string_field(object, "value", path)?)),
        other => Err(InputError::shape(path, format!("unknown node type '{}'", other))),
    }
}

fn build_element<'a>(
    arena: &'a DomArena,
    object: &Map<String, Value>,
    path: &str,
) -> Result<DomNode<'a>, InputError> {
    let name = string_field(object, "name", path)?;
    if name.is_empty() {
        return Err(InputError::shape(path, "element name is empty"));
    }

    let mut attributes = Vec::new();
    match object.get("attributes") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, value) in map {
                let Value::String(value) = value else {
                    return Err(InputError::shape(
                        path,
                        format!("attribute '{}' must be a string", key),
                    ));
                };
                attributes.push((key.as_str(), value.as_str()));
            }
        }
        Some(_) => return Err(InputError::shape(path, "'attributes' must be an object")),
    }

    let mut children = Vec::new();
    match object.get("children") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            children.reserve(items.len());
            for (index, item) in items.iter().enumerate() {
                let child_path = format!("{}.children[{}]", path, index);
                children.push(build_node(arena, item, &child_path)?);
            }
        }
        Some(_) => return Err(InputError::shape(path, "'children' must be an array")),
    }

    Ok(arena.element_with_attributes(name, &attributes, &children))
}

fn string_field<'v>(
    object: &'v Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'v str, InputError> {
    match object.get(key) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(InputError::shape(path, format!("'{}' must be a string", key))),
        None => Err(InputError::shape(path, format!("missing '{}'", key))),
    }
}
