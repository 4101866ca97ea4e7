//! Dart source rendering for a synthesized class forest.
//!
//! Emits null-safety classes: a named-parameter constructor, a `fromJson`
//! factory, final fields, `toJson`. Nullability prints as one trailing
//! `?` on the immediate type; `Null` and `dynamic` never take the marker,
//! and the element type inside `List<…>` is printed without its own.

use crate::ir::{BaseType, ClassDefinition, ClassForest, Field, TypeDescriptor};
use crate::naming;

#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every class in forest order, blank-line separated.
    pub fn emit(&mut self, forest: &ClassForest) {
        for (index, class) in forest.values().enumerate() {
            if index > 0 {
                self.out.push('\n');
            }
            self.emit_class(class);
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_class(&mut self, class: &ClassDefinition) {
        self.out.push_str(&format!("class {} {{\n", class.name));
        self.emit_constructor(class);
        self.out.push('\n');
        self.emit_from_json(class);
        self.out.push('\n');
        self.emit_fields(class);
        if !class.fields.is_empty() {
            self.out.push('\n');
        }
        self.emit_to_json(class);
        self.out.push_str("}\n");
    }

    fn emit_constructor(&mut self, class: &ClassDefinition) {
        if class.fields.is_empty() {
            self.out.push_str(&format!("  {}();\n", class.name));
            return;
        }
        self.out.push_str(&format!("  {}({{\n", class.name));
        for field in &class.fields {
            let param = naming::field_name(&field.name);
            if accepts_null(&field.ty) {
                self.out.push_str(&format!("    this.{param},\n"));
            } else {
                self.out.push_str(&format!("    required this.{param},\n"));
            }
        }
        self.out.push_str("  });\n");
    }

    fn emit_from_json(&mut self, class: &ClassDefinition) {
        let header =
            format!("  factory {0}.fromJson(Map<String, dynamic> json) => {0}(", class.name);
        if class.fields.is_empty() {
            self.out.push_str(&format!("{header});\n"));
            return;
        }
        self.out.push_str(&format!("{header}\n"));
        for field in &class.fields {
            self.out.push_str(&format!(
                "        {}: {},\n",
                naming::field_name(&field.name),
                from_json_expr(field)
            ));
        }
        self.out.push_str("      );\n");
    }

    fn emit_fields(&mut self, class: &ClassDefinition) {
        for field in &class.fields {
            self.out.push_str(&format!(
                "  final {} {};\n",
                dart_type(&field.ty),
                naming::field_name(&field.name)
            ));
        }
    }

    fn emit_to_json(&mut self, class: &ClassDefinition) {
        if class.fields.is_empty() {
            self.out
                .push_str("  Map<String, dynamic> toJson() => <String, dynamic>{};\n");
            return;
        }
        self.out.push_str("  Map<String, dynamic> toJson() => <String, dynamic>{\n");
        for field in &class.fields {
            self.out.push_str(&format!(
                "        {}: {},\n",
                dart_string_literal(&field.name),
                to_json_expr(field)
            ));
        }
        self.out.push_str("      };\n");
    }
}

/// Forest → Dart source in one call.
pub fn render_dart(forest: &ClassForest) -> String {
    let mut cg = Codegen::new();
    cg.emit(forest);
    cg.into_string()
}

/// Rendered Dart type for a descriptor: `List<…>` is textually recursive,
/// and a nullable slot gets exactly one trailing `?`.
pub fn dart_type(ty: &TypeDescriptor) -> String {
    let text = base_text(&ty.base);
    if ty.nullable && !matches!(ty.base, BaseType::Null | BaseType::Dynamic) {
        format!("{text}?")
    } else {
        text
    }
}

// ---------------------------- internals ---------------------------- //

fn base_text(base: &BaseType) -> String {
    match base {
        BaseType::String => "String".into(),
        BaseType::Bool => "bool".into(),
        BaseType::Int => "int".into(),
        BaseType::Double => "double".into(),
        BaseType::Num => "num".into(),
        BaseType::Dynamic => "dynamic".into(),
        BaseType::Null => "Null".into(),
        BaseType::Class(name) => name.clone(),
        BaseType::List(element) => format!("List<{}>", base_text(&element.base)),
    }
}

/// Optional constructor parameter: the rendered type can already hold
/// null.
fn accepts_null(ty: &TypeDescriptor) -> bool {
    ty.nullable || matches!(ty.base, BaseType::Null | BaseType::Dynamic)
}

fn from_json_expr(field: &Field) -> String {
    let access = format!("json[{}]", dart_string_literal(&field.name));
    match &field.ty.base {
        // dynamic positions take the value as-is
        BaseType::Dynamic | BaseType::Null => access,
        BaseType::Class(name) => {
            let call = format!("{name}.fromJson({access} as Map<String, dynamic>)");
            if field.ty.nullable {
                format!("{access} == null ? null : {call}")
            } else {
                call
            }
        }
        BaseType::List(element) => {
            let marker = if field.ty.nullable { "?" } else { "" };
            match &element.base {
                BaseType::Class(name) => format!(
                    "({access} as List<dynamic>{marker}){marker}.map((e) => \
                     {name}.fromJson(e as Map<String, dynamic>)).toList()"
                ),
                BaseType::Dynamic => format!("{access} as List<dynamic>{marker}"),
                other => format!(
                    "({access} as List<dynamic>{marker}){marker}.cast<{}>()",
                    base_text(other)
                ),
            }
        }
        scalar => {
            let marker = if field.ty.nullable { "?" } else { "" };
            format!("{access} as {}{marker}", base_text(scalar))
        }
    }
}

fn to_json_expr(field: &Field) -> String {
    let name = naming::field_name(&field.name);
    let marker = if field.ty.nullable { "?" } else { "" };
    match &field.ty.base {
        BaseType::Class(_) => format!("{name}{marker}.toJson()"),
        BaseType::List(element) if matches!(element.base, BaseType::Class(_)) => {
            format!("{name}{marker}.map((e) => e.toJson()).toList()")
        }
        _ => name,
    }
}

/// Single-quoted Dart string literal; escapes backslash, quote, and the
/// interpolation sigil.
fn dart_string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}
