//! Signature-to-schema compiler
//!
//! Pure transform from a [`ToolSignature`] to a [`ParameterSchema`]. Runs once
//! when a tool is registered so that incomplete signatures fail before any
//! call can reach them.

use serde_json::{json, Map, Value};

use super::types::{ParamType, ToolSignature};
use crate::core::SchemaError;

/// Schema primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
}

/// One node of a compiled parameter schema
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(Primitive),
    /// Array of `items`
    Array(Box<SchemaNode>),
    /// Object whose values all match the wrapped node
    Object(Box<SchemaNode>),
    /// String restricted to these values
    Enum(Vec<String>),
    /// Wrapped node or null
    Nullable(Box<SchemaNode>),
}

impl SchemaNode {
    pub fn is_nullable(&self) -> bool {
        matches!(self, SchemaNode::Nullable(_))
    }

    /// Render as a JSON-Schema-like object
    pub fn to_json(&self) -> Value {
        match self {
            SchemaNode::Primitive(p) => json!({ "type": p.as_str() }),
            SchemaNode::Array(items) => json!({
                "type": "array",
                "items": items.to_json(),
            }),
            SchemaNode::Object(values) => json!({
                "type": "object",
                "additionalProperties": values.to_json(),
            }),
            SchemaNode::Enum(values) => json!({
                "type": "string",
                "enum": values,
            }),
            SchemaNode::Nullable(inner) => {
                let mut value = inner.to_json();
                if let Value::Object(ref mut obj) = value {
                    obj.insert("nullable".to_string(), Value::Bool(true));
                }
                value
            }
        }
    }
}

/// A compiled top-level parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub node: SchemaNode,
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<Value>,
}

/// Compiled schema for a tool's parameters, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    properties: Vec<Property>,
}

impl ParameterSchema {
    /// Compiled parameters in declaration order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Names of required parameters, in declaration order
    pub fn required(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Declared defaults, keyed by parameter name
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties
            .iter()
            .filter_map(|p| p.default.as_ref().map(|d| (p.name.as_str(), d)))
    }

    /// Render as the `parameters` object of a function-calling tool descriptor
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for prop in &self.properties {
            let mut node = prop.node.to_json();
            if let (Some(desc), Value::Object(obj)) = (&prop.description, &mut node) {
                obj.insert("description".to_string(), Value::String(desc.clone()));
            }
            properties.insert(prop.name.clone(), node);
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required(),
        })
    }
}

/// Compile a declared type into a schema node
pub fn compile_type(ty: &ParamType) -> SchemaNode {
    match ty {
        ParamType::String => SchemaNode::Primitive(Primitive::String),
        ParamType::Integer => SchemaNode::Primitive(Primitive::Integer),
        ParamType::Number => SchemaNode::Primitive(Primitive::Number),
        ParamType::Boolean => SchemaNode::Primitive(Primitive::Boolean),
        ParamType::Enum(values) => SchemaNode::Enum(values.clone()),
        ParamType::Array(item) => SchemaNode::Array(Box::new(compile_type(item))),
        ParamType::Map(value) => SchemaNode::Object(Box::new(compile_type(value))),
        ParamType::Optional(inner) => match compile_type(inner) {
            // Optional<Optional<T>> is still just nullable T
            node @ SchemaNode::Nullable(_) => node,
            node => SchemaNode::Nullable(Box::new(node)),
        },
    }
}

/// Compile a tool's signature
///
/// Fails with [`SchemaError::MissingParameterTypes`] naming every untyped
/// parameter, or with [`SchemaError::MissingReturnType`] when only the result
/// type is missing. The receiver parameter is skipped entirely.
pub fn compile(tool: &str, signature: &ToolSignature) -> Result<ParameterSchema, SchemaError> {
    let params: Vec<_> = signature.params.iter().filter(|p| !p.receiver).collect();

    let missing: Vec<String> = params
        .iter()
        .filter(|p| p.ty.is_none())
        .map(|p| p.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingParameterTypes {
            tool: tool.to_string(),
            params: missing,
        });
    }

    if signature.returns.is_none() {
        return Err(SchemaError::MissingReturnType {
            tool: tool.to_string(),
        });
    }

    let properties = params
        .into_iter()
        .filter_map(|p| {
            let ty = p.ty.as_ref()?;
            let node = compile_type(ty);
            let required = p.default.is_none() && !node.is_nullable();
            Some(Property {
                name: p.name.clone(),
                node,
                description: p.description.clone(),
                required,
                default: p.default.clone(),
            })
        })
        .collect();

    Ok(ParameterSchema { properties })
}
