// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! On-demand synthesis of structural bag types.
//!
//! An interim type is a struct described only by its member set: all
//! fields readable and writable, no declared constructors, identity
//! determined by the canonical (sorted) member signature. Requesting
//! the same member set twice yields the same descriptor, so converter
//! caches keyed by type name behave as expected for synthesized types.

use crate::error::{MapError, Result};
use crate::types::{FieldDescriptor, StructDescriptor, TypeDescriptor, TypeKind};
use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Cache of synthesized struct descriptors keyed by canonical member
/// signature.
#[derive(Debug, Default)]
pub struct InterimTypeFactory {
    cache: DashMap<String, Arc<TypeDescriptor>>,
}

impl InterimTypeFactory {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Descriptor for the struct type with exactly the given members.
    ///
    /// Member order does not matter: two calls with the same set in any
    /// order return the same `Arc`. Duplicate member names must agree
    /// on type; a conflicting duplicate is rejected.
    pub fn interim_type(
        &self,
        members: &[(Arc<str>, Arc<TypeDescriptor>)],
    ) -> Result<Arc<TypeDescriptor>> {
        if members.is_empty() {
            return Err(MapError::invalid("interim type needs at least one member"));
        }

        let mut canonical: Vec<(Arc<str>, Arc<TypeDescriptor>)> = Vec::new();
        let mut sorted: Vec<&(Arc<str>, Arc<TypeDescriptor>)> = members.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, ty) in sorted {
            if name.trim().is_empty() {
                return Err(MapError::invalid("interim member name is empty or blank"));
            }
            match canonical.last() {
                Some((prev, prev_ty)) if prev == name => {
                    if prev_ty.fingerprint() != ty.fingerprint() {
                        return Err(MapError::invalid(format!(
                            "interim member '{name}' declared with conflicting types"
                        )));
                    }
                    // Exact duplicate, deduped.
                }
                _ => canonical.push((name.clone(), ty.clone())),
            }
        }

        let signature = signature_of(&canonical);
        if let Some(hit) = self.cache.get(&signature) {
            return Ok(hit.clone());
        }

        let descriptor = Arc::new(synthesize(&canonical, &signature));
        let entry = self
            .cache
            .entry(signature)
            .or_insert_with(|| descriptor.clone());
        Ok(entry.clone())
    }

    /// Number of distinct synthesized types.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn signature_of(members: &[(Arc<str>, Arc<TypeDescriptor>)]) -> String {
    let mut out = String::new();
    for (name, ty) in members {
        out.push_str(name);
        out.push('=');
        out.push_str(&ty.fingerprint());
        out.push(';');
    }
    out
}

fn synthesize(members: &[(Arc<str>, Arc<TypeDescriptor>)], signature: &str) -> TypeDescriptor {
    let mut hasher = DefaultHasher::new();
    signature.hash(&mut hasher);
    let name = format!("Interim_{:016x}", hasher.finish());
    log::trace!("[interim] synthesized {name} ({} members)", members.len());

    let fields = members
        .iter()
        .map(|(name, ty)| FieldDescriptor::new(name.clone(), ty.clone()))
        .collect();
    TypeDescriptor::new(
        name,
        TypeKind::Struct(StructDescriptor {
            fields,
            constructors: Vec::new(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrimitiveKind, TypeDescriptorBuilder};

    fn int_ty() -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::primitive("int32", PrimitiveKind::I32))
    }

    fn str_ty() -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::primitive("string", PrimitiveKind::String))
    }

    #[test]
    fn same_members_yield_same_descriptor() {
        let factory = InterimTypeFactory::new();
        let a = factory
            .interim_type(&[("x".into(), int_ty()), ("y".into(), str_ty())])
            .unwrap();
        let b = factory
            .interim_type(&[("x".into(), int_ty()), ("y".into(), str_ty())])
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn member_order_does_not_matter() {
        let factory = InterimTypeFactory::new();
        let a = factory
            .interim_type(&[("x".into(), int_ty()), ("y".into(), str_ty())])
            .unwrap();
        let b = factory
            .interim_type(&[("y".into(), str_ty()), ("x".into(), int_ty())])
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_members_yield_different_types() {
        let factory = InterimTypeFactory::new();
        let a = factory.interim_type(&[("x".into(), int_ty())]).unwrap();
        let b = factory.interim_type(&[("x".into(), str_ty())]).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.name, b.name);
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn exact_duplicate_member_is_deduped() {
        let factory = InterimTypeFactory::new();
        let t = factory
            .interim_type(&[("x".into(), int_ty()), ("x".into(), int_ty())])
            .unwrap();
        match &t.kind {
            TypeKind::Struct(s) => assert_eq!(s.fields.len(), 1),
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn conflicting_duplicate_is_rejected() {
        let factory = InterimTypeFactory::new();
        let err = factory
            .interim_type(&[("x".into(), int_ty()), ("x".into(), str_ty())])
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidArgument(_)));
    }

    #[test]
    fn empty_member_set_is_rejected() {
        let factory = InterimTypeFactory::new();
        assert!(factory.interim_type(&[]).is_err());
    }

    #[test]
    fn synthesized_type_is_mappable() {
        use crate::context::MapperContext;
        use crate::types::{struct_value, Value};

        let factory = InterimTypeFactory::new();
        let interim = factory
            .interim_type(&[("n".into(), int_ty())])
            .unwrap();
        let dest = Arc::new(
            TypeDescriptorBuilder::new("Dest")
                .field("n", PrimitiveKind::I32)
                .build(),
        );

        let ctx = MapperContext::new();
        let out = ctx
            .convert(&interim, &dest, &struct_value([("n", Value::I32(5))]))
            .unwrap();
        assert_eq!(out.get_field("n"), Some(&Value::I32(5)));
    }
}
