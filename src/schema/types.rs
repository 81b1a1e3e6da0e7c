//! Declarative tool signatures
//!
//! A tool describes its `execute` parameters as data: a list of
//! [`ParamSpec`] plus a declared [`ReturnType`]. The compiler turns that
//! list into a [`ParameterSchema`](super::ParameterSchema).

use serde_json::Value;

/// Declared type of a tool parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    /// Text
    String,
    /// Whole number
    Integer,
    /// Fractional number
    Number,
    /// Boolean flag
    Boolean,
    /// One of a fixed set of values, in declaration order
    Enum(Vec<String>),
    /// Homogeneous ordered collection
    Array(Box<ParamType>),
    /// Mapping from text keys to values of one type
    Map(Box<ParamType>),
    /// Value that may be explicitly absent
    Optional(Box<ParamType>),
}

impl ParamType {
    /// Ordered collection of `item`
    pub fn array(item: ParamType) -> Self {
        ParamType::Array(Box::new(item))
    }

    /// Text-keyed mapping to `value`
    pub fn map(value: ParamType) -> Self {
        ParamType::Map(Box::new(value))
    }

    /// `inner` or absent
    pub fn optional(inner: ParamType) -> Self {
        ParamType::Optional(Box::new(inner))
    }

    /// Enumeration from raw values
    pub fn enum_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamType::Enum(values.into_iter().map(Into::into).collect())
    }

    /// Enumeration built from a Rust enum's wire values
    pub fn enumeration<E: SchemaEnum>() -> Self {
        ParamType::Enum(E::VARIANTS.iter().map(|v| v.value().to_string()).collect())
    }
}

/// A Rust enum usable as an enumeration parameter
///
/// The schema lists each variant's [`value`](SchemaEnum::value), not its
/// identifier, in the order of [`VARIANTS`](SchemaEnum::VARIANTS).
///
/// ```ignore
/// enum Priority { High, Low }
///
/// impl SchemaEnum for Priority {
///     const VARIANTS: &'static [Self] = &[Priority::High, Priority::Low];
///     fn value(&self) -> &'static str {
///         match self {
///             Priority::High => "high",
///             Priority::Low => "low",
///         }
///     }
/// }
/// ```
pub trait SchemaEnum: Sized + 'static {
    /// All variants, in declaration order
    const VARIANTS: &'static [Self];

    /// Wire value of this variant
    fn value(&self) -> &'static str;
}

/// Declared result type of a tool
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnType {
    /// Plain text
    Text,
    /// Arbitrary structured JSON
    Json,
    /// A value of a specific parameter type
    Typed(ParamType),
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    /// `None` when the author left the type undeclared
    pub ty: Option<ParamType>,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Implicit receiver, skipped by the compiler
    pub receiver: bool,
}

impl ParamSpec {
    /// A typed parameter with no default
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: None,
            description: None,
            receiver: false,
        }
    }

    /// A parameter whose type was never declared
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
            description: None,
            receiver: false,
        }
    }

    /// The implicit receiver (`self`)
    pub fn receiver() -> Self {
        Self {
            name: "self".to_string(),
            ty: None,
            default: None,
            description: None,
            receiver: true,
        }
    }

    /// Attach a free-text description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Give the parameter a default, making it optional
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A full `execute` signature: parameters in declaration order plus result type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSignature {
    pub params: Vec<ParamSpec>,
    pub returns: Option<ReturnType>,
}

impl ToolSignature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declare the result type
    pub fn returns(mut self, returns: ReturnType) -> Self {
        self.returns = Some(returns);
        self
    }
}
