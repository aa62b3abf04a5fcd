// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enum translation by variant name.
//!
//! Activates when the desired type is an enumeration. Variants are
//! paired by name at resolution time; values play no part in the
//! pairing, so a source variant at ordinal 2 maps to whatever explicit
//! value the same-named destination variant declares. Unmatched names
//! (and plain numeric sources) fall back to a raw cast into the
//! destination's underlying primitive. That cast wraps across differing
//! signed/unsigned underlying types; the wraparound is accepted,
//! documented behavior, not an error.

use crate::error::{MapError, Result};
use crate::matcher::NameMatcher;
use crate::resolve::direct::cast_integer;
use crate::resolve::{MemberAccessor, MemberResolver};
use crate::types::{EnumDescriptor, ShapeCache, TypeDescriptor, TypeKind, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves members whose desired type is an enum.
pub struct EnumTranslateResolver {
    matcher: Arc<dyn NameMatcher>,
    shapes: Arc<ShapeCache>,
}

impl EnumTranslateResolver {
    /// Create the resolver over a shared shape cache.
    pub fn new(matcher: Arc<dyn NameMatcher>, shapes: Arc<ShapeCache>) -> Self {
        Self { matcher, shapes }
    }

    /// Pair source variants with destination variants by name.
    fn variant_map(
        &self,
        source: &EnumDescriptor,
        dest: &EnumDescriptor,
    ) -> Result<HashMap<i64, (i64, Arc<str>)>> {
        let mut map = HashMap::with_capacity(source.variants.len());
        for sv in &source.variants {
            for dv in &dest.variants {
                if self.matcher.is_match(&sv.name, &dv.name)? {
                    map.insert(sv.value, (dv.value, dv.name.clone()));
                    break;
                }
            }
        }
        Ok(map)
    }
}

impl MemberResolver for EnumTranslateResolver {
    fn name(&self) -> &'static str {
        "enum-translate"
    }

    fn try_resolve(
        &self,
        source: &Arc<TypeDescriptor>,
        member: &str,
        desired: &Arc<TypeDescriptor>,
    ) -> Result<Option<MemberAccessor>> {
        let Some(dest_enum) = desired.as_enum() else {
            return Ok(None);
        };
        let Some(shape) = self.shapes.shape_of(source) else {
            return Ok(None);
        };

        let mut matched = None;
        for field in &shape.readable {
            if self.matcher.is_match(&field.name, member)? {
                matched = Some(field.clone());
                break;
            }
        }
        let Some(field) = matched else {
            return Ok(None);
        };

        // Source side must be an enum or an integer for the value
        // fallback to make sense.
        let by_name = match &field.ty.kind {
            TypeKind::Enum(src_enum) => self.variant_map(src_enum, dest_enum)?,
            TypeKind::Primitive(p) if p.is_integer() => HashMap::new(),
            _ => return Ok(None),
        };

        let field_name = field.name.clone();
        let underlying = dest_enum.underlying;
        let dest_variants: Vec<(i64, Arc<str>)> = dest_enum
            .variants
            .iter()
            .map(|v| (v.value, v.name.clone()))
            .collect();

        let read_name = field_name.clone();
        let read: crate::resolve::ReadFn = Arc::new(move |src: &Value| {
            let v = src
                .get_field(&read_name)
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "source member missing"))?;
            if v.is_null() {
                return Ok(Value::Null);
            }

            if let Some(n) = v.enum_value() {
                if let Some((dv, dname)) = by_name.get(&n) {
                    return Ok(Value::Enum(*dv, dname.to_string()));
                }
            }

            // Raw numeric fallback: wrap into the destination's
            // underlying kind.
            let n = v
                .integer_value()
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "value not enum-convertible"))?;
            let wrapped = cast_integer(n, underlying)
                .and_then(|c| c.integer_value())
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "underlying kind not integer"))?;
            let name = dest_variants
                .iter()
                .find(|(dv, _)| *dv == wrapped)
                .map(|(_, dn)| dn.to_string())
                .or_else(|| v.enum_variant().map(str::to_string))
                .unwrap_or_default();
            Ok(Value::Enum(wrapped, name))
        });

        Ok(Some(
            MemberAccessor::new(source.clone(), desired.clone(), Some(field_name), read)
                .forwarding_null(),
        ))
    }
}
