//! Per-position type resolution.
//!
//! One call resolves one JSON position (a single value, or an array's
//! element list) to a [`TypeDescriptor`]. Array policy, in evaluation
//! order:
//! - nested arrays are refused (`UnsupportedShape`); nothing else runs
//! - `[]` types as `List<dynamic>`
//! - int + double (null aside) widens to `num`
//! - any null marks the element and the array slot nullable; the first
//!   non-null element picks the type
//! - otherwise the first element picks the type; no widening beyond
//!   int + double exists

use crate::ast::{AstNode, ScalarKind};
use crate::error::{Error, Result};
use crate::ir::{BaseType, TypeDescriptor};
use crate::naming;

/// One resolution call. Exactly one of `node` / `siblings` may be set;
/// `key` is the JSON key the position sits under, and class names derive
/// from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRequest<'a> {
    pub node: Option<&'a AstNode>,
    pub siblings: Option<&'a [AstNode]>,
    pub key: &'a str,
}

pub fn resolve(request: ResolveRequest<'_>) -> Result<TypeDescriptor> {
    match (request.node, request.siblings) {
        (Some(node), None) => resolve_value(node, request.key),
        (None, Some(siblings)) => resolve_array(siblings, request.key),
        (Some(_), Some(_)) => Err(Error::InvalidInput(format!(
            "resolve request for key '{}' carries both a node and a sibling list",
            request.key
        ))),
        (None, None) => Err(Error::InvalidInput(format!(
            "resolve request for key '{}' carries neither a node nor a sibling list",
            request.key
        ))),
    }
}

/// Resolve a single value sitting under `key`.
pub fn resolve_value(node: &AstNode, key: &str) -> Result<TypeDescriptor> {
    match node {
        AstNode::Literal(scalar) => Ok(scalar_descriptor(scalar.kind())),
        AstNode::Object(_) => Ok(TypeDescriptor::new(BaseType::Class(naming::class_name(key)))),
        AstNode::Array(elements) => resolve_array(elements, key),
    }
}

/// Unify an array's elements into a single `List<…>` descriptor. `key`
/// is the key the array sits under; an element class is named after it.
pub fn resolve_array(elements: &[AstNode], key: &str) -> Result<TypeDescriptor> {
    let kinds = elements
        .iter()
        .map(|element| element_kind(element, key))
        .collect::<Result<Vec<_>>>()?;

    if kinds.is_empty() {
        // documented fallback: [] types as List<dynamic>
        return Ok(list_of(TypeDescriptor::new(BaseType::Dynamic), false, false));
    }

    let has_null = kinds.contains(&ElementKind::Literal(ScalarKind::Null));

    // int + double widens to num; nulls only set the nullable flags
    let widens_to_num = kinds.contains(&ElementKind::Literal(ScalarKind::Integer))
        && kinds.contains(&ElementKind::Literal(ScalarKind::Float))
        && kinds.iter().all(|kind| {
            matches!(
                kind,
                ElementKind::Literal(ScalarKind::Integer | ScalarKind::Float | ScalarKind::Null)
            )
        });
    if widens_to_num {
        let element = TypeDescriptor { nullable: has_null, ..TypeDescriptor::new(BaseType::Num) };
        return Ok(list_of(element, has_null, false));
    }

    // The first non-null element decides the type; with nulls in the mix
    // the element and the slot both turn nullable.
    let Some(decider) = kinds
        .iter()
        .copied()
        .find(|kind| *kind != ElementKind::Literal(ScalarKind::Null))
    else {
        // every element is null
        return Ok(list_of(scalar_descriptor(ScalarKind::Null), false, false));
    };

    match decider {
        ElementKind::Literal(kind) => {
            let mut element = scalar_descriptor(kind);
            element.nullable = element.nullable || has_null;
            Ok(list_of(element, has_null, false))
        }
        ElementKind::Object => {
            let element = TypeDescriptor {
                nullable: has_null,
                ..TypeDescriptor::new(BaseType::Class(naming::class_name(key)))
            };
            Ok(list_of(element, has_null, true))
        }
    }
}

// ---------------------------- internals ---------------------------- //

/// Element classification inside one array. Scalars keep their subtype;
/// nested arrays never make it past construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Literal(ScalarKind),
    Object,
}

fn element_kind(node: &AstNode, key: &str) -> Result<ElementKind> {
    match node {
        AstNode::Literal(scalar) => Ok(ElementKind::Literal(scalar.kind())),
        AstNode::Object(_) => Ok(ElementKind::Object),
        AstNode::Array(_) => Err(Error::UnsupportedShape(format!(
            "multi-dimensional array under key '{key}'"
        ))),
    }
}

fn scalar_descriptor(kind: ScalarKind) -> TypeDescriptor {
    match kind {
        ScalarKind::Integer => TypeDescriptor::new(BaseType::Int),
        ScalarKind::Float => TypeDescriptor::new(BaseType::Double),
        ScalarKind::String => TypeDescriptor::new(BaseType::String),
        ScalarKind::Boolean => TypeDescriptor::new(BaseType::Bool),
        ScalarKind::Null => {
            TypeDescriptor { nullable: true, ..TypeDescriptor::new(BaseType::Null) }
        }
    }
}

fn list_of(element: TypeDescriptor, nullable: bool, is_array_of_objects: bool) -> TypeDescriptor {
    TypeDescriptor {
        base: BaseType::List(Box::new(element)),
        nullable,
        is_array_of_objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Scalar;

    fn elements(v: serde_json::Value) -> Vec<AstNode> {
        match AstNode::from_value(&v) {
            AstNode::Array(items) => items,
            _ => panic!("fixture must be an array"),
        }
    }

    fn list_element(ty: &TypeDescriptor) -> &TypeDescriptor {
        match &ty.base {
            BaseType::List(element) => element,
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn homogeneous_ints_stay_int() {
        let ty = resolve_array(&elements(serde_json::json!([1, 2, 3])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Int);
        assert!(!ty.nullable);
        assert!(!list_element(&ty).nullable);
    }

    #[test]
    fn int_plus_double_widens_to_num() {
        let ty = resolve_array(&elements(serde_json::json!([1, 2.5])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Num);
        assert!(!ty.nullable);
    }

    #[test]
    fn null_mixed_int_turns_nullable() {
        let ty = resolve_array(&elements(serde_json::json!([1, null])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Int);
        assert!(ty.nullable);
        assert!(list_element(&ty).nullable);
    }

    #[test]
    fn widening_applies_before_null_degrade() {
        // first non-null is a double; the int later still widens to num
        let ty = resolve_array(&elements(serde_json::json!([1.0, 2, null])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Num);
        assert!(ty.nullable);
        assert!(list_element(&ty).nullable);
    }

    #[test]
    fn string_with_null_turns_nullable() {
        let ty = resolve_array(&elements(serde_json::json!(["a", null])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::String);
        assert!(ty.nullable);
    }

    #[test]
    fn all_null_collapses_to_null_element() {
        let ty = resolve_array(&elements(serde_json::json!([null])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Null);
        assert!(list_element(&ty).nullable);
        assert!(!ty.nullable);
    }

    #[test]
    fn empty_array_is_list_dynamic() {
        let ty = resolve_array(&elements(serde_json::json!([])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Dynamic);
        assert!(!ty.nullable);
    }

    #[test]
    fn nested_array_is_refused() {
        let err = resolve_array(&elements(serde_json::json!([[1, 2], [3, 4]])), "grid")
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedShape(_)));
        assert!(err.to_string().contains("grid"));
    }

    #[test]
    fn object_elements_make_a_class() {
        let ty =
            resolve_array(&elements(serde_json::json!([{"a": 1}, {"a": 2}])), "items").unwrap();
        assert!(ty.is_array_of_objects);
        assert_eq!(list_element(&ty).base, BaseType::Class("Items".into()));
        assert_eq!(ty.class_name(), Some("Items"));
        assert!(!ty.nullable);
    }

    #[test]
    fn object_mixed_with_null_keeps_class_and_turns_nullable() {
        let ty = resolve_array(&elements(serde_json::json!([{"a": 1}, null])), "items").unwrap();
        assert!(ty.is_array_of_objects);
        assert_eq!(list_element(&ty).base, BaseType::Class("Items".into()));
        assert!(ty.nullable);
        assert!(list_element(&ty).nullable);
    }

    #[test]
    fn mixed_kinds_without_null_take_the_first() {
        let ty = resolve_array(&elements(serde_json::json!([1, "a"])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::Int);
        assert!(!ty.nullable);
    }

    #[test]
    fn null_then_string_takes_first_non_null() {
        let ty = resolve_array(&elements(serde_json::json!([null, "a", null])), "xs").unwrap();
        assert_eq!(list_element(&ty).base, BaseType::String);
        assert!(ty.nullable);
    }

    #[test]
    fn scalar_values_resolve_directly() {
        let cases = [
            (serde_json::json!(1), BaseType::Int, false),
            (serde_json::json!(2.5), BaseType::Double, false),
            (serde_json::json!("x"), BaseType::String, false),
            (serde_json::json!(true), BaseType::Bool, false),
            (serde_json::json!(null), BaseType::Null, true),
        ];
        for (value, base, nullable) in cases {
            let ty = resolve_value(&AstNode::from_value(&value), "k").unwrap();
            assert_eq!(ty.base, base);
            assert_eq!(ty.nullable, nullable);
        }
    }

    #[test]
    fn object_value_names_its_class_after_the_key() {
        let node = AstNode::from_value(&serde_json::json!({"id": 1}));
        let ty = resolve_value(&node, "user_profile").unwrap();
        assert_eq!(ty.base, BaseType::Class("UserProfile".into()));
        assert_eq!(ty.class_name(), Some("UserProfile"));
    }

    #[test]
    fn request_with_both_inputs_is_invalid() {
        let node = AstNode::Literal(Scalar::Null);
        let siblings = [AstNode::Literal(Scalar::Null)];
        let err = resolve(ResolveRequest {
            node: Some(&node),
            siblings: Some(&siblings),
            key: "k",
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn request_with_neither_input_is_invalid() {
        let err = resolve(ResolveRequest::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn request_routes_to_the_matching_form() {
        let node = AstNode::from_value(&serde_json::json!(7));
        let single = resolve(ResolveRequest { node: Some(&node), siblings: None, key: "n" });
        assert_eq!(single.unwrap().base, BaseType::Int);

        let siblings = elements(serde_json::json!(["a", "b"]));
        let unified =
            resolve(ResolveRequest { node: None, siblings: Some(&siblings), key: "tags" })
                .unwrap();
        assert_eq!(list_element(&unified).base, BaseType::String);
    }
}
