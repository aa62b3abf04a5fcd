// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type model: descriptors, values, builders, derived shapes.
//!
//! Everything the mapper knows about a type at runtime lives here.
//! Descriptors are immutable, `Arc`-shared, and compared structurally;
//! the shape layer derives constructor/property metadata once per type.

pub mod builder;
mod descriptor;
mod shape;
mod value;

pub use builder::{
    opt_param, param, primitive, sequence_of, EnumBuilder, TypeDescriptorBuilder,
};
pub use descriptor::{
    ConstructorDescriptor, EnumDescriptor, EnumVariant, FieldDescriptor, ParameterDescriptor,
    PrimitiveKind, SequenceDescriptor, StructDescriptor, TypeDescriptor, TypeKind,
};
pub use shape::{ShapeCache, TypeShape};
pub use value::{struct_value, Value};
