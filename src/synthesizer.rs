//! Object-shape synthesis: walk an object AST, resolve every property,
//! and collect one [`ClassDefinition`] per shape into a [`ClassForest`].

use crate::ast::{AstNode, ObjectNode};
use crate::error::{Error, Result};
use crate::ir::{ClassDefinition, ClassForest, Field};
use crate::naming;
use crate::resolver;

#[derive(Debug, Default)]
pub struct ClassSynthesizer {
    forest: ClassForest,
}

impl ClassSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synthesize the whole document. The root must be an object; the
    /// forest comes back root first, nested shapes depth-first in field
    /// order. Any resolution error aborts with no partial forest.
    pub fn synthesize(mut self, root: &AstNode, root_class: &str) -> Result<ClassForest> {
        let Some(object) = root.as_object() else {
            return Err(Error::InvalidInput("top-level JSON must be an object".into()));
        };
        let name = if root_class.is_empty() { naming::UNNAMED } else { root_class };
        self.define_class(name, object)?;
        Ok(self.forest)
    }

    fn define_class(&mut self, name: &str, object: &ObjectNode) -> Result<()> {
        let mut fields = Vec::with_capacity(object.properties.len());
        let mut nested = Vec::<(String, &ObjectNode)>::new();

        for property in &object.properties {
            let ty = resolver::resolve_value(&property.value, &property.key)?;
            if let Some(class) = ty.class_name() {
                if let Some(shape) = nested_shape(&property.value) {
                    nested.push((class.to_string(), shape));
                }
            }
            fields.push(Field { name: property.key.clone(), ty });
        }

        self.forest
            .insert(name.to_string(), ClassDefinition { name: name.to_string(), fields });

        // nested shapes come after the class that references them
        for (class, shape) in nested {
            self.define_class(&class, shape)?;
        }
        Ok(())
    }
}

/// The object node that defines a class-valued property's shape: the
/// object itself, or the first object element of its array.
fn nested_shape(value: &AstNode) -> Option<&ObjectNode> {
    match value {
        AstNode::Object(object) => Some(object),
        AstNode::Array(items) => items.iter().find_map(AstNode::as_object),
        AstNode::Literal(_) => None,
    }
}

/// One-call convenience over [`ClassSynthesizer`].
pub fn synthesize(root: &AstNode, root_class: &str) -> Result<ClassForest> {
    ClassSynthesizer::new().synthesize(root, root_class)
}
