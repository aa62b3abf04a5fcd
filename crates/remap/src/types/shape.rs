// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Derived type shapes and the process-lifetime shape cache.
//!
//! A [`TypeShape`] is what the plan builders actually consume: the
//! effective constructor list of a struct plus its readable/writable
//! field sets. Shapes are derived once per type and cached for the
//! lifetime of the cache; descriptors are immutable, so a derived shape
//! never goes stale.

use crate::types::{ConstructorDescriptor, FieldDescriptor, ParameterDescriptor, TypeDescriptor};
use dashmap::DashMap;
use std::sync::Arc;

/// Effective construction and member-access metadata for one struct type.
#[derive(Debug)]
pub struct TypeShape {
    /// Constructors considered by the constructor plan builder, in
    /// enumeration order.
    pub constructors: Vec<ConstructorDescriptor>,
    /// The parameterless constructor available to property-set plans,
    /// if the type has one.
    pub parameterless: Option<ConstructorDescriptor>,
    /// Publicly readable fields.
    pub readable: Vec<FieldDescriptor>,
    /// Publicly writable, non-indexed fields.
    pub writable: Vec<FieldDescriptor>,
}

impl TypeShape {
    /// Derive the shape of a struct descriptor. Returns `None` for
    /// non-struct types.
    ///
    /// Declared constructors are used verbatim. A struct that declares
    /// none gets a derived all-fields constructor (every parameter
    /// required, named after its field) and an implicit parameterless
    /// constructor for property-set plans.
    pub fn derive(desc: &TypeDescriptor) -> Option<Self> {
        let s = desc.as_struct()?;

        let (constructors, parameterless) = if s.constructors.is_empty() {
            let all_fields = ConstructorDescriptor::new(
                s.fields
                    .iter()
                    .filter(|f| !f.indexed)
                    .map(|f| ParameterDescriptor::required(f.name.clone(), f.ty.clone()))
                    .collect(),
            );
            (vec![all_fields], Some(ConstructorDescriptor::parameterless()))
        } else {
            let parameterless = s
                .constructors
                .iter()
                .find(|c| c.is_parameterless())
                .cloned();
            (s.constructors.clone(), parameterless)
        };

        let readable = s
            .fields
            .iter()
            .filter(|f| f.readable && !f.indexed)
            .cloned()
            .collect();
        let writable = s
            .fields
            .iter()
            .filter(|f| f.writable && !f.indexed)
            .cloned()
            .collect();

        Some(Self {
            constructors,
            parameterless,
            readable,
            writable,
        })
    }

    /// Find a readable field by exact name.
    pub fn readable_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.readable.iter().find(|f| f.name.as_ref() == name)
    }
}

/// Derive-once concurrent cache of type shapes, keyed by structural
/// identity.
#[derive(Debug, Default)]
pub struct ShapeCache {
    inner: DashMap<String, Arc<TypeShape>>,
}

impl ShapeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached shape for a struct descriptor, deriving it on first
    /// use. Returns `None` for non-struct types.
    pub fn shape_of(&self, desc: &TypeDescriptor) -> Option<Arc<TypeShape>> {
        let key = desc.fingerprint();
        if let Some(hit) = self.inner.get(&key) {
            return Some(hit.clone());
        }
        let derived = Arc::new(TypeShape::derive(desc)?);
        log::trace!("[shape] derived shape for {}", desc.name);
        Some(
            self.inner
                .entry(key)
                .or_insert(derived)
                .clone(),
        )
    }

    /// Number of cached shapes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing has been derived yet.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
