// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for TypeDescriptor.

use crate::types::{
    ConstructorDescriptor, EnumDescriptor, EnumVariant, FieldDescriptor, ParameterDescriptor,
    PrimitiveKind, SequenceDescriptor, StructDescriptor, TypeDescriptor, TypeKind, Value,
};
use std::sync::Arc;

/// Builder for struct type descriptors.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: Arc<str>,
    fields: Vec<FieldDescriptor>,
    constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a struct type.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Add a primitive field.
    pub fn field(mut self, name: impl Into<Arc<str>>, kind: PrimitiveKind) -> Self {
        let ty = Arc::new(TypeDescriptor::primitive(primitive_name(kind), kind));
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    /// Add a field with a type descriptor.
    pub fn field_with_type(
        mut self,
        name: impl Into<Arc<str>>,
        ty: Arc<TypeDescriptor>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<Arc<str>>) -> Self {
        self.field(name, PrimitiveKind::String)
    }

    /// Add an unbounded sequence field.
    pub fn sequence_field(mut self, name: impl Into<Arc<str>>, element: Arc<TypeDescriptor>) -> Self {
        let seq_name: Arc<str> = format!("seq<{}>", element.name).into();
        let ty = Arc::new(TypeDescriptor::new(
            seq_name,
            TypeKind::Sequence(SequenceDescriptor::new(element)),
        ));
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    /// Add a pre-built field descriptor (read-only, write-only, indexed, ...).
    pub fn raw_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a constructor. Declaration order is preserved and meaningful
    /// for plan tie-breaking.
    pub fn constructor(mut self, params: Vec<ParameterDescriptor>) -> Self {
        self.constructors.push(ConstructorDescriptor::new(params));
        self
    }

    /// Declare a parameterless constructor.
    pub fn parameterless_constructor(mut self) -> Self {
        self.constructors.push(ConstructorDescriptor::parameterless());
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(
            self.name,
            TypeKind::Struct(StructDescriptor {
                fields: self.fields,
                constructors: self.constructors,
            }),
        )
    }

    /// Build and wrap in `Arc` (the form every mapper API takes).
    pub fn build_arc(self) -> Arc<TypeDescriptor> {
        Arc::new(self.build())
    }
}

/// Builder for enum types.
#[derive(Debug)]
pub struct EnumBuilder {
    name: Arc<str>,
    variants: Vec<EnumVariant>,
    next_value: i64,
    underlying: PrimitiveKind,
}

impl EnumBuilder {
    /// Create a new enum builder.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            next_value: 0,
            underlying: PrimitiveKind::I32,
        }
    }

    /// Add a variant with auto-incrementing value.
    pub fn variant(mut self, name: impl Into<Arc<str>>) -> Self {
        self.variants.push(EnumVariant::new(name, self.next_value));
        self.next_value += 1;
        self
    }

    /// Add a variant with explicit value.
    pub fn variant_value(mut self, name: impl Into<Arc<str>>, value: i64) -> Self {
        self.variants.push(EnumVariant::new(name, value));
        self.next_value = value + 1;
        self
    }

    /// Set underlying type.
    pub fn underlying(mut self, kind: PrimitiveKind) -> Self {
        self.underlying = kind;
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        let desc = EnumDescriptor::new(self.variants).with_underlying(self.underlying);
        TypeDescriptor::new(self.name, TypeKind::Enum(desc))
    }

    /// Build and wrap in `Arc`.
    pub fn build_arc(self) -> Arc<TypeDescriptor> {
        Arc::new(self.build())
    }
}

/// Free-standing sequence type constructor.
pub fn sequence_of(element: Arc<TypeDescriptor>) -> Arc<TypeDescriptor> {
    let name: Arc<str> = format!("seq<{}>", element.name).into();
    Arc::new(TypeDescriptor::new(
        name,
        TypeKind::Sequence(SequenceDescriptor::new(element)),
    ))
}

/// Canonical name for a primitive kind.
pub(crate) fn primitive_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Bool => "bool",
        PrimitiveKind::U8 => "uint8",
        PrimitiveKind::U16 => "uint16",
        PrimitiveKind::U32 => "uint32",
        PrimitiveKind::U64 => "uint64",
        PrimitiveKind::I8 => "int8",
        PrimitiveKind::I16 => "int16",
        PrimitiveKind::I32 => "int32",
        PrimitiveKind::I64 => "int64",
        PrimitiveKind::F32 => "float32",
        PrimitiveKind::F64 => "float64",
        PrimitiveKind::Char => "char",
        PrimitiveKind::String => "string",
    }
}

/// Primitive descriptor of a kind, under its canonical name.
pub fn primitive(kind: PrimitiveKind) -> Arc<TypeDescriptor> {
    Arc::new(TypeDescriptor::primitive(primitive_name(kind), kind))
}

/// Required constructor parameter shorthand.
pub fn param(name: impl Into<Arc<str>>, ty: Arc<TypeDescriptor>) -> ParameterDescriptor {
    ParameterDescriptor::required(name, ty)
}

/// Optional constructor parameter shorthand.
pub fn opt_param(
    name: impl Into<Arc<str>>,
    ty: Arc<TypeDescriptor>,
    default: Option<Value>,
) -> ParameterDescriptor {
    let mut p = ParameterDescriptor::optional(name, ty);
    p.default = default;
    p
}
