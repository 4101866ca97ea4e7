//! Parsed-input AST: what the engine walks instead of `serde_json::Value`.
//!
//! Three node kinds, closed by construction; the conversion from
//! `serde_json::Value` is total, so no "unknown node" case exists past
//! this boundary. Object key order is preserved as parsed.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Literal(Scalar),
    Array(Vec<AstNode>),
    Object(ObjectNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: AstNode,
}

/// JSON scalar payload. Numbers stay `serde_json::Number` so `1` and
/// `1.0` remain distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

/// Closed scalar classification. [`Scalar::kind`] is the only place that
/// decides integer-vs-float; widening consults nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Integer,
    Float,
    String,
    Boolean,
    Null,
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Bool(_) => ScalarKind::Boolean,
            Scalar::Null => ScalarKind::Null,
            Scalar::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ScalarKind::Integer
                } else {
                    ScalarKind::Float
                }
            }
        }
    }
}

impl AstNode {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => AstNode::Literal(Scalar::Null),
            Value::Bool(b) => AstNode::Literal(Scalar::Bool(*b)),
            Value::Number(n) => AstNode::Literal(Scalar::Number(n.clone())),
            Value::String(s) => AstNode::Literal(Scalar::String(s.clone())),
            Value::Array(items) => {
                AstNode::Array(items.iter().map(AstNode::from_value).collect())
            }
            Value::Object(map) => AstNode::Object(ObjectNode {
                properties: map
                    .iter()
                    .map(|(key, value)| Property {
                        key: key.clone(),
                        value: AstNode::from_value(value),
                    })
                    .collect(),
            }),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            AstNode::Object(obj) => Some(obj),
            _ => None,
        }
    }
}
