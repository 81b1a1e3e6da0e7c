//! Parameter schemas for tools
//!
//! This module provides:
//! - `ToolSignature` / `ParamSpec` / `ParamType` - Declarative description of a tool's parameters
//! - `SchemaEnum` - Trait for Rust enums used as enumeration parameters
//! - `compile` - Signature-to-schema compiler
//! - `ParameterSchema` - Compiled schema, rendered as JSON for function calling

mod compiler;
mod types;

pub use compiler::{compile, compile_type, ParameterSchema, Primitive, Property, SchemaNode};
pub use types::{ParamSpec, ParamType, ReturnType, SchemaEnum, ToolSignature};
