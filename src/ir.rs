// Strongly-typed class model for codegen. No serde_json::Value here.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    pub base: BaseType,
    pub nullable: bool,            // this slot may hold null
    pub is_array_of_objects: bool, // the unified element type is a synthesized class
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    String,
    Bool,
    Int,
    Double,
    Num,
    Dynamic,
    Null,
    Class(String),
    List(Box<TypeDescriptor>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String, // raw JSON key; identifiers derive from it at render time
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDefinition {
    pub name: String,
    pub fields: Vec<Field>, // declaration order of the source object
}

/// Every class synthesized from one document, root first, nested shapes
/// depth-first in field order. Keyed by class name; on a name collision
/// the slot keeps its first position and the last definition.
pub type ClassForest = IndexMap<String, ClassDefinition>;

impl TypeDescriptor {
    pub fn new(base: BaseType) -> Self {
        Self { base, nullable: false, is_array_of_objects: false }
    }

    /// Class this descriptor refers to, looking through a flagged list.
    pub fn class_name(&self) -> Option<&str> {
        match &self.base {
            BaseType::Class(name) => Some(name),
            BaseType::List(element) if self.is_array_of_objects => element.class_name(),
            _ => None,
        }
    }
}
