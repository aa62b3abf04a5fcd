// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.
//!
//! A [`TypeDescriptor`] is the mapper's view of a type: its fields,
//! declared constructors, and (for enums) its variants. Descriptors are
//! immutable once built and shared via `Arc` across plans and converters.

use crate::types::Value;
use std::sync::Arc;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// True for integer and floating-point kinds.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Bool | Self::Char | Self::String)
    }

    /// True for integer kinds (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        self.is_numeric() && !matches!(self, Self::F32 | Self::F64)
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive type.
    Primitive(PrimitiveKind),
    /// Struct with named fields and optional declared constructors.
    Struct(StructDescriptor),
    /// Sequence (dynamic length).
    Sequence(SequenceDescriptor),
    /// Enumeration.
    Enum(EnumDescriptor),
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type name.
    pub name: Arc<str>,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: impl Into<Arc<str>>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a primitive type descriptor.
    pub fn primitive(name: impl Into<Arc<str>>, kind: PrimitiveKind) -> Self {
        Self::new(name, TypeKind::Primitive(kind))
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Check if this is an enum type.
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Get struct metadata if this is a struct.
    pub fn as_struct(&self) -> Option<&StructDescriptor> {
        match &self.kind {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Get enum metadata if this is an enum.
    pub fn as_enum(&self) -> Option<&EnumDescriptor> {
        match &self.kind {
            TypeKind::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Get sequence metadata if this is a sequence.
    pub fn as_sequence(&self) -> Option<&SequenceDescriptor> {
        match &self.kind {
            TypeKind::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        self.as_struct().map(|s| s.fields.as_slice())
    }

    /// Get field by name (exact match; lenient matching lives in the resolvers).
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()?.iter().find(|f| f.name.as_ref() == name)
    }

    /// Structural identity string, used as a cache key component.
    ///
    /// Two descriptors with the same fingerprint are interchangeable for
    /// resolution purposes.
    pub fn fingerprint(&self) -> String {
        let mut out = String::new();
        self.write_fingerprint(&mut out);
        out
    }

    fn write_fingerprint(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push(':');
        match &self.kind {
            TypeKind::Primitive(p) => out.push_str(&format!("{p:?}")),
            TypeKind::Struct(s) => {
                out.push_str("struct{");
                for f in &s.fields {
                    out.push_str(&f.name);
                    out.push('=');
                    f.ty.write_fingerprint(out);
                    out.push(';');
                }
                out.push('}');
            }
            TypeKind::Sequence(s) => {
                out.push_str("seq<");
                s.element.write_fingerprint(out);
                out.push('>');
            }
            TypeKind::Enum(e) => {
                out.push_str("enum{");
                for v in &e.variants {
                    out.push_str(&format!("{}={};", v.name, v.value));
                }
                out.push('}');
            }
        }
    }
}

/// Struct metadata: ordered fields plus declared constructors.
///
/// When `constructors` is empty the shape layer derives an all-fields
/// constructor and a parameterless constructor (see `types::shape`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructDescriptor {
    /// Ordered named fields.
    pub fields: Vec<FieldDescriptor>,
    /// Declared constructors, in declaration order.
    pub constructors: Vec<ConstructorDescriptor>,
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: Arc<str>,
    /// Field type.
    pub ty: Arc<TypeDescriptor>,
    /// Publicly readable.
    pub readable: bool,
    /// Publicly writable.
    pub writable: bool,
    /// Indexed member (never a mapping target).
    pub indexed: bool,
}

impl FieldDescriptor {
    /// Create a readable, writable, non-indexed field.
    pub fn new(name: impl Into<Arc<str>>, ty: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: true,
            writable: true,
            indexed: false,
        }
    }

    /// Mark read-only.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Mark write-only.
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Mark as indexed.
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

/// A declared constructor: ordered parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstructorDescriptor {
    /// Ordered parameters.
    pub params: Vec<ParameterDescriptor>,
}

impl ConstructorDescriptor {
    /// Create a constructor from its parameters.
    pub fn new(params: Vec<ParameterDescriptor>) -> Self {
        Self { params }
    }

    /// The parameterless constructor.
    pub fn parameterless() -> Self {
        Self { params: Vec::new() }
    }

    /// True when this constructor takes no parameters.
    pub fn is_parameterless(&self) -> bool {
        self.params.is_empty()
    }
}

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: Arc<str>,
    /// Parameter type.
    pub ty: Arc<TypeDescriptor>,
    /// Optional parameter (may be defaulted when unresolved).
    pub optional: bool,
    /// Declared default value, if any.
    pub default: Option<Value>,
}

impl ParameterDescriptor {
    /// Create a required parameter.
    pub fn required(name: impl Into<Arc<str>>, ty: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            default: None,
        }
    }

    /// Create an optional parameter with no declared default (zero value applies).
    pub fn optional(name: impl Into<Arc<str>>, ty: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
            default: None,
        }
    }

    /// Attach a declared default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.optional = true;
        self.default = Some(default);
        self
    }
}

/// Sequence type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDescriptor {
    /// Element type.
    pub element: Arc<TypeDescriptor>,
}

impl SequenceDescriptor {
    /// Create a sequence descriptor.
    pub fn new(element: Arc<TypeDescriptor>) -> Self {
        Self { element }
    }
}

/// Enumeration type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Enum variants.
    pub variants: Vec<EnumVariant>,
    /// Underlying type (default i32).
    pub underlying: PrimitiveKind,
}

impl EnumDescriptor {
    /// Create enum descriptor with the default underlying type.
    pub fn new(variants: Vec<EnumVariant>) -> Self {
        Self {
            variants,
            underlying: PrimitiveKind::I32,
        }
    }

    /// Create with specific underlying type.
    pub fn with_underlying(mut self, underlying: PrimitiveKind) -> Self {
        self.underlying = underlying;
        self
    }

    /// Get variant by name.
    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.name.as_ref() == name)
    }

    /// Get variant by value.
    pub fn variant_by_value(&self, value: i64) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| v.value == value)
    }
}

/// Enum variant.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    /// Variant name.
    pub name: Arc<str>,
    /// Variant value.
    pub value: i64,
}

impl EnumVariant {
    /// Create enum variant.
    pub fn new(name: impl Into<Arc<str>>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struct_descriptor_field_lookup() {
        let i32_ty = Arc::new(TypeDescriptor::primitive("int32", PrimitiveKind::I32));
        let f64_ty = Arc::new(TypeDescriptor::primitive("float64", PrimitiveKind::F64));

        let desc = TypeDescriptor::new(
            "Point",
            TypeKind::Struct(StructDescriptor {
                fields: vec![
                    FieldDescriptor::new("x", i32_ty.clone()),
                    FieldDescriptor::new("y", f64_ty),
                ],
                constructors: Vec::new(),
            }),
        );

        assert!(desc.is_struct());
        assert_eq!(desc.fields().map(<[_]>::len), Some(2));
        assert!(desc.field("x").is_some());
        assert!(desc.field("z").is_none());
    }

    #[test]
    fn enum_descriptor_lookup() {
        let e = EnumDescriptor::new(vec![
            EnumVariant::new("Red", 0),
            EnumVariant::new("Green", 1),
            EnumVariant::new("Blue", 2),
        ]);
        assert_eq!(e.variant("Green").map(|v| v.value), Some(1));
        assert_eq!(
            e.variant_by_value(2).map(|v| v.name.as_ref()),
            Some("Blue")
        );
        assert_eq!(e.underlying, PrimitiveKind::I32);
    }

    #[test]
    fn fingerprint_differs_on_field_type() {
        let i32_ty = Arc::new(TypeDescriptor::primitive("int32", PrimitiveKind::I32));
        let i64_ty = Arc::new(TypeDescriptor::primitive("int64", PrimitiveKind::I64));

        let a = TypeDescriptor::new(
            "T",
            TypeKind::Struct(StructDescriptor {
                fields: vec![FieldDescriptor::new("v", i32_ty)],
                constructors: Vec::new(),
            }),
        );
        let b = TypeDescriptor::new(
            "T",
            TypeKind::Struct(StructDescriptor {
                fields: vec![FieldDescriptor::new("v", i64_ty)],
                constructors: Vec::new(),
            }),
        );
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn parameter_with_default_is_optional() {
        let i32_ty = Arc::new(TypeDescriptor::primitive("int32", PrimitiveKind::I32));
        let p = ParameterDescriptor::required("count", i32_ty).with_default(Value::I32(7));
        assert!(p.optional);
        assert_eq!(p.default, Some(Value::I32(7)));
    }
}
