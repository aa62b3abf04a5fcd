// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # remap - Runtime object-to-object mapping
//!
//! A mapping engine that converts values between structurally described
//! types at runtime: conversion plans are resolved once per type pair,
//! compiled into reusable converter functions, and cached in a
//! caller-owned context. No compile-time knowledge of the mapped types
//! is required; types are described by [`TypeDescriptor`]s and instances
//! carried as [`Value`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use remap::{MapperContext, PrimitiveKind, TypeDescriptorBuilder, Value, struct_value};
//! use std::sync::Arc;
//!
//! fn main() -> remap::Result<()> {
//!     let order = Arc::new(
//!         TypeDescriptorBuilder::new("Order")
//!             .field("quantity", PrimitiveKind::I32)
//!             .string_field("customer_name")
//!             .build(),
//!     );
//!     let summary = Arc::new(
//!         TypeDescriptorBuilder::new("OrderSummary")
//!             .field("quantity", PrimitiveKind::I64)
//!             .string_field("customername")
//!             .build(),
//!     );
//!
//!     let ctx = MapperContext::new();
//!     let converter = ctx.get_converter(&order, &summary)?;
//!
//!     let out = converter.convert(&struct_value([
//!         ("quantity", Value::I32(3)),
//!         ("customer_name", Value::String("Ada".into())),
//!     ]))?;
//!     assert_eq!(out.get_field("quantity"), Some(&Value::I64(3)));
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MapperContext`] | Entry point; owns the converter cache and resolver registry |
//! | [`TypeDescriptor`] | Structural description of a mappable type |
//! | [`Value`] | Dynamically typed instance of a described type |
//! | [`CompiledConverter`] | Reusable, thread-safe conversion function for one type pair |
//! | [`MapOptions`] | Per-mapping policies (null handling, match mode, plan preference) |
//! | [`InterimTypeFactory`] | On-demand synthesis of structural bag types |
//!
//! ## Modules Overview
//!
//! - [`types`] - Type descriptors, values, builders, derived shapes
//! - [`resolve`] - Member-accessor resolution strategies
//! - [`plan`] - Constructor and property-set plan builders
//! - [`convert`] - Compiled converters and conversion policies
//! - [`matcher`] - Member-name matching

/// Caller-owned mapping context (start here).
pub mod context;
/// Compiled converters and conversion policies.
pub mod convert;
/// Error types for plan resolution and conversion.
pub mod error;
/// On-demand synthesis of structural bag types.
pub mod interim;
/// Member-name matching.
pub mod matcher;
/// Conversion plan builders and prioritisation.
pub mod plan;
/// Resolver registry (converter-aware resolution chains).
pub mod registry;
/// Member-accessor resolution strategies.
pub mod resolve;
/// Runtime type model.
pub mod types;

pub use context::{MapperContext, MapperContextBuilder};
pub use convert::{
    CompiledConverter, MapOptions, NullObjectPolicy, OverridePolicy, PlanPreference,
    PropertyMatchMode, SequenceNullPolicy, INITIALISED_FLAG,
};
pub use error::{MapError, Result};
pub use interim::InterimTypeFactory;
pub use matcher::{LenientNameMatcher, NameMatcher};
pub use plan::{ConversionPlan, MostResolvedParams, Prioritiser};
pub use registry::ConverterRegistry;
pub use resolve::{MemberAccessor, MemberResolver, ResolverChain};
pub use types::{
    ConstructorDescriptor, EnumBuilder, EnumDescriptor, EnumVariant, FieldDescriptor,
    ParameterDescriptor, PrimitiveKind, SequenceDescriptor, StructDescriptor, TypeDescriptor,
    TypeDescriptorBuilder, TypeKind, Value, sequence_of, struct_value,
};
