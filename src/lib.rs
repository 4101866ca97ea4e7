//! Infer a null-safe Dart class model from a JSON document.
//!
//! Pipeline: `serde_json::Value` → [`ast::AstNode`] → [`synthesizer`]
//! (one [`resolver`] call per property) → [`ir::ClassForest`] →
//! [`codegen`] Dart text.

pub mod ast;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod naming;
pub mod resolver;
pub mod synthesizer;

pub use ast::AstNode;
pub use codegen::render_dart;
pub use error::{Error, Result};
pub use ir::{BaseType, ClassDefinition, ClassForest, Field, TypeDescriptor};
pub use resolver::{resolve, ResolveRequest};
pub use synthesizer::{synthesize, ClassSynthesizer};
