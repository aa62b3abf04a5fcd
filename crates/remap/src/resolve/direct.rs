// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Direct assignment with numeric coercion.

use crate::error::{MapError, Result};
use crate::matcher::NameMatcher;
use crate::resolve::{MemberAccessor, MemberResolver};
use crate::types::{PrimitiveKind, ShapeCache, TypeDescriptor, TypeKind, Value};
use std::sync::Arc;

/// Whether a value of `from` can populate a slot of type `to` directly
/// or via numeric coercion.
///
/// Primitives are compared by kind (descriptor names do not matter);
/// any two numeric kinds are mutually coercible. Composite types
/// require structural identity.
pub fn assignable(from: &TypeDescriptor, to: &TypeDescriptor) -> bool {
    match (&from.kind, &to.kind) {
        (TypeKind::Primitive(a), TypeKind::Primitive(b)) => {
            a == b || (a.is_numeric() && b.is_numeric())
        }
        _ => from == to,
    }
}

/// Coerce a primitive value into a target kind.
///
/// Integer narrowing wraps (two's-complement truncation, `as`-cast
/// semantics); float-to-integer saturates. Returns `None` when the
/// value is not coercible to `to` at all (non-numeric mismatch).
pub fn coerce(value: &Value, to: PrimitiveKind) -> Option<Value> {
    if value.primitive_kind() == Some(to) {
        return Some(value.clone());
    }

    // Integer source, any numeric target.
    if let Some(n) = value.integer_value() {
        return cast_integer(n, to);
    }

    // Float source.
    let f = match value {
        Value::F32(v) => f64::from(*v),
        Value::F64(v) => *v,
        _ => return None,
    };
    Some(match to {
        PrimitiveKind::F32 => Value::F32(f as f32),
        PrimitiveKind::F64 => Value::F64(f),
        PrimitiveKind::U8 => Value::U8(f as u8),
        PrimitiveKind::U16 => Value::U16(f as u16),
        PrimitiveKind::U32 => Value::U32(f as u32),
        PrimitiveKind::U64 => Value::U64(f as u64),
        PrimitiveKind::I8 => Value::I8(f as i8),
        PrimitiveKind::I16 => Value::I16(f as i16),
        PrimitiveKind::I32 => Value::I32(f as i32),
        PrimitiveKind::I64 => Value::I64(f as i64),
        _ => return None,
    })
}

/// Wrapping cast of an i64 view into a numeric kind.
pub(crate) fn cast_integer(n: i64, to: PrimitiveKind) -> Option<Value> {
    Some(match to {
        PrimitiveKind::U8 => Value::U8(n as u8),
        PrimitiveKind::U16 => Value::U16(n as u16),
        PrimitiveKind::U32 => Value::U32(n as u32),
        PrimitiveKind::U64 => Value::U64(n as u64),
        PrimitiveKind::I8 => Value::I8(n as i8),
        PrimitiveKind::I16 => Value::I16(n as i16),
        PrimitiveKind::I32 => Value::I32(n as i32),
        PrimitiveKind::I64 => Value::I64(n),
        PrimitiveKind::F32 => Value::F32(n as f32),
        PrimitiveKind::F64 => Value::F64(n as f64),
        _ => None?,
    })
}

/// Reads a name-matched source field whose type is assignable to the
/// desired type, coercing numerics if needed. Declines when no
/// name-matched readable field exists or the types are not assignable.
pub struct DirectAssignResolver {
    matcher: Arc<dyn NameMatcher>,
    shapes: Arc<ShapeCache>,
}

impl DirectAssignResolver {
    /// Create the resolver over a shared shape cache.
    pub fn new(matcher: Arc<dyn NameMatcher>, shapes: Arc<ShapeCache>) -> Self {
        Self { matcher, shapes }
    }
}

impl MemberResolver for DirectAssignResolver {
    fn name(&self) -> &'static str {
        "direct-assign"
    }

    fn try_resolve(
        &self,
        source: &Arc<TypeDescriptor>,
        member: &str,
        desired: &Arc<TypeDescriptor>,
    ) -> Result<Option<MemberAccessor>> {
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

        if !assignable(&field.ty, desired) {
            return Ok(None);
        }

        let field_name = field.name.clone();
        let needs_coercion = field.ty.kind != desired.kind;
        let target_kind = match &desired.kind {
            TypeKind::Primitive(p) => Some(*p),
            _ => None,
        };

        let read_name = field_name.clone();
        let read: crate::resolve::ReadFn = Arc::new(move |src: &Value| {
            let v = src
                .get_field(&read_name)
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "source member missing"))?;
            if v.is_null() {
                return Ok(Value::Null);
            }
            if !needs_coercion {
                return Ok(v.clone());
            }
            let kind = target_kind
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "coercion target not primitive"))?;
            coerce(v, kind)
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "value not coercible"))
        });

        Ok(Some(
            MemberAccessor::new(source.clone(), desired.clone(), Some(field_name), read)
                .forwarding_null(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::LenientNameMatcher;
    use crate::types::{primitive, struct_value, TypeDescriptorBuilder};

    fn resolver() -> DirectAssignResolver {
        DirectAssignResolver::new(Arc::new(LenientNameMatcher), Arc::new(ShapeCache::new()))
    }

    #[test]
    fn resolves_name_matched_field() {
        let source = Arc::new(
            TypeDescriptorBuilder::new("Src")
                .field("sensor_id", PrimitiveKind::U32)
                .build(),
        );
        let acc = resolver()
            .try_resolve(&source, "SensorId", &primitive(PrimitiveKind::U32))
            .unwrap()
            .expect("resolved");

        let v = struct_value([("sensor_id", Value::U32(7))]);
        assert_eq!(acc.read(&v).unwrap(), Value::U32(7));
        assert_eq!(acc.source_member.as_deref(), Some("sensor_id"));
    }

    #[test]
    fn coerces_numeric_widening() {
        let source = Arc::new(
            TypeDescriptorBuilder::new("Src")
                .field("n", PrimitiveKind::U8)
                .build(),
        );
        let acc = resolver()
            .try_resolve(&source, "n", &primitive(PrimitiveKind::I64))
            .unwrap()
            .expect("resolved");

        let v = struct_value([("n", Value::U8(200))]);
        assert_eq!(acc.read(&v).unwrap(), Value::I64(200));
    }

    #[test]
    fn declines_unmatched_name_and_type() {
        let source = Arc::new(
            TypeDescriptorBuilder::new("Src")
                .field("label", PrimitiveKind::String)
                .build(),
        );
        let r = resolver();
        assert!(r
            .try_resolve(&source, "other", &primitive(PrimitiveKind::String))
            .unwrap()
            .is_none());
        assert!(r
            .try_resolve(&source, "label", &primitive(PrimitiveKind::I32))
            .unwrap()
            .is_none());
    }

    #[test]
    fn narrowing_wraps() {
        assert_eq!(coerce(&Value::I32(300), PrimitiveKind::U8), Some(Value::U8(44)));
        assert_eq!(coerce(&Value::I32(-1), PrimitiveKind::U8), Some(Value::U8(255)));
    }

    #[test]
    fn null_field_forwarded() {
        let source = Arc::new(
            TypeDescriptorBuilder::new("Src")
                .field("n", PrimitiveKind::I32)
                .build(),
        );
        let acc = resolver()
            .try_resolve(&source, "n", &primitive(PrimitiveKind::I32))
            .unwrap()
            .expect("resolved");
        let v = struct_value([("n", Value::Null)]);
        assert_eq!(acc.read(&v).unwrap(), Value::Null);
        assert!(acc.forwards_null);
    }
}
