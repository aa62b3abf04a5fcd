// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Strategies learned from previously compiled converters.
//!
//! Every successful mapping teaches the registry two new strategies:
//! an object-level one delegating a nested member to the new converter,
//! and a sequence-level one delegating element-wise over countable
//! sequences of its types. Both are prepended to the chain so outer
//! types pick them up for contained fields.

use crate::convert::{CompiledConverter, SequenceNullPolicy};
use crate::error::{MapError, Result};
use crate::matcher::NameMatcher;
use crate::resolve::{MemberAccessor, MemberResolver};
use crate::types::{FieldDescriptor, ShapeCache, TypeDescriptor, Value};
use std::sync::Arc;

fn name_matched_field(
    matcher: &Arc<dyn NameMatcher>,
    shapes: &ShapeCache,
    source: &TypeDescriptor,
    member: &str,
) -> Result<Option<FieldDescriptor>> {
    let Some(shape) = shapes.shape_of(source) else {
        return Ok(None);
    };
    for field in &shape.readable {
        if matcher.is_match(&field.name, member)? {
            return Ok(Some(field.clone()));
        }
    }
    Ok(None)
}

/// Delegates a name-matched member to a known converter whose declared
/// (source, destination) pair equals (member type, desired type).
///
/// Null handling is inherited from the wrapped converter: the member
/// value, null included, is fed straight into it.
pub struct ObjectConverterResolver {
    converter: Arc<CompiledConverter>,
    matcher: Arc<dyn NameMatcher>,
    shapes: Arc<ShapeCache>,
}

impl ObjectConverterResolver {
    /// Wrap a compiled converter.
    pub fn new(
        converter: Arc<CompiledConverter>,
        matcher: Arc<dyn NameMatcher>,
        shapes: Arc<ShapeCache>,
    ) -> Self {
        Self {
            converter,
            matcher,
            shapes,
        }
    }
}

impl MemberResolver for ObjectConverterResolver {
    fn name(&self) -> &'static str {
        "learned-object"
    }

    fn try_resolve(
        &self,
        source: &Arc<TypeDescriptor>,
        member: &str,
        desired: &Arc<TypeDescriptor>,
    ) -> Result<Option<MemberAccessor>> {
        if desired.as_ref() != self.converter.dest().as_ref() {
            return Ok(None);
        }
        let Some(field) = name_matched_field(&self.matcher, &self.shapes, source, member)? else {
            return Ok(None);
        };
        if field.ty.as_ref() != self.converter.source().as_ref() {
            return Ok(None);
        }

        let converter = self.converter.clone();
        let read_name = field.name.clone();
        let read: crate::resolve::ReadFn = Arc::new(move |src: &Value| {
            let v = src
                .get_field(&read_name)
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "source member missing"))?;
            converter.convert(v)
        });

        Ok(Some(MemberAccessor::new(
            source.clone(),
            desired.clone(),
            Some(field.name),
            read,
        )))
    }
}

/// Element-wise delegation over sequences whose element types match a
/// known converter.
pub struct SequenceConverterResolver {
    converter: Arc<CompiledConverter>,
    matcher: Arc<dyn NameMatcher>,
    shapes: Arc<ShapeCache>,
    policy: SequenceNullPolicy,
}

impl SequenceConverterResolver {
    /// Wrap a compiled converter; `policy` governs null sequence input.
    pub fn new(
        converter: Arc<CompiledConverter>,
        matcher: Arc<dyn NameMatcher>,
        shapes: Arc<ShapeCache>,
        policy: SequenceNullPolicy,
    ) -> Self {
        Self {
            converter,
            matcher,
            shapes,
            policy,
        }
    }
}

impl MemberResolver for SequenceConverterResolver {
    fn name(&self) -> &'static str {
        "learned-sequence"
    }

    fn try_resolve(
        &self,
        source: &Arc<TypeDescriptor>,
        member: &str,
        desired: &Arc<TypeDescriptor>,
    ) -> Result<Option<MemberAccessor>> {
        let Some(desired_seq) = desired.as_sequence() else {
            return Ok(None);
        };
        if desired_seq.element.as_ref() != self.converter.dest().as_ref() {
            return Ok(None);
        }
        let Some(field) = name_matched_field(&self.matcher, &self.shapes, source, member)? else {
            return Ok(None);
        };
        let Some(source_seq) = field.ty.as_sequence() else {
            return Ok(None);
        };
        if source_seq.element.as_ref() != self.converter.source().as_ref() {
            return Ok(None);
        }

        let converter = self.converter.clone();
        let policy = self.policy;
        let read_name = field.name.clone();
        let read: crate::resolve::ReadFn = Arc::new(move |src: &Value| {
            let v = src
                .get_field(&read_name)
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "source member missing"))?;
            if v.is_null() {
                return match policy {
                    SequenceNullPolicy::PreserveNull => Ok(Value::Null),
                    SequenceNullPolicy::AssumeNonNull => Err(MapError::failed(
                        read_name.as_ref(),
                        "null sequence under assume-non-null policy",
                    )),
                };
            }
            let elements = v
                .as_seq()
                .ok_or_else(|| MapError::failed(read_name.as_ref(), "member is not a sequence"))?;
            // Empty in, empty out. Never null.
            let mut out = Vec::with_capacity(elements.len());
            for element in elements {
                out.push(converter.convert(element)?);
            }
            Ok(Value::Seq(out))
        });

        Ok(Some(MemberAccessor::new(
            source.clone(),
            desired.clone(),
            Some(field.name),
            read,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::LenientNameMatcher;
    use crate::types::{sequence_of, struct_value, PrimitiveKind, TypeDescriptorBuilder};

    fn sub_types() -> (Arc<TypeDescriptor>, Arc<TypeDescriptor>) {
        let src = Arc::new(
            TypeDescriptorBuilder::new("SubSrc")
                .string_field("name")
                .build(),
        );
        let dst = Arc::new(
            TypeDescriptorBuilder::new("SubDest")
                .string_field("name")
                .build(),
        );
        (src, dst)
    }

    fn sub_converter(
        src: &Arc<TypeDescriptor>,
        dst: &Arc<TypeDescriptor>,
    ) -> Arc<CompiledConverter> {
        Arc::new(CompiledConverter::custom(
            src.clone(),
            dst.clone(),
            [Arc::<str>::from("name")],
            |v| {
                if v.is_null() {
                    return Ok(Value::Null);
                }
                let name = v
                    .get_field("name")
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(struct_value([("name", name)]))
            },
        ))
    }

    #[test]
    fn object_resolver_delegates_nested_member() {
        let (sub_src, sub_dst) = sub_types();
        let outer = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("value", sub_src.clone())
                .build(),
        );
        let resolver = ObjectConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
        );

        let acc = resolver
            .try_resolve(&outer, "Value", &sub_dst)
            .unwrap()
            .expect("resolved");
        let input = struct_value([("value", struct_value([("name", Value::from("Bo1"))]))]);
        let out = acc.read(&input).unwrap();
        assert_eq!(
            out.get_field("name"),
            Some(&Value::String("Bo1".into()))
        );
    }

    #[test]
    fn object_resolver_inherits_null_handling() {
        let (sub_src, sub_dst) = sub_types();
        let outer = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("value", sub_src.clone())
                .build(),
        );
        let resolver = ObjectConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
        );
        let acc = resolver
            .try_resolve(&outer, "value", &sub_dst)
            .unwrap()
            .expect("resolved");
        let input = struct_value([("value", Value::Null)]);
        assert_eq!(acc.read(&input).unwrap(), Value::Null);
    }

    #[test]
    fn sequence_resolver_maps_elements_in_order() {
        let (sub_src, sub_dst) = sub_types();
        let outer = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("value_list", sequence_of(sub_src.clone()))
                .build(),
        );
        let resolver = SequenceConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
            SequenceNullPolicy::PreserveNull,
        );

        let acc = resolver
            .try_resolve(&outer, "ValueList", &sequence_of(sub_dst))
            .unwrap()
            .expect("resolved");
        let input = struct_value([(
            "value_list",
            Value::Seq(vec![
                struct_value([("name", Value::from("Bo2"))]),
                struct_value([("name", Value::from("Bo3"))]),
            ]),
        )]);
        let out = acc.read(&input).unwrap();
        let seq = out.as_seq().expect("sequence");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].get_field("name"), Some(&Value::String("Bo2".into())));
        assert_eq!(seq[1].get_field("name"), Some(&Value::String("Bo3".into())));
    }

    #[test]
    fn sequence_resolver_null_policies() {
        let (sub_src, sub_dst) = sub_types();
        let outer = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("items", sequence_of(sub_src.clone()))
                .build(),
        );
        let input = struct_value([("items", Value::Null)]);

        let preserve = SequenceConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
            SequenceNullPolicy::PreserveNull,
        );
        let acc = preserve
            .try_resolve(&outer, "items", &sequence_of(sub_dst.clone()))
            .unwrap()
            .expect("resolved");
        assert_eq!(acc.read(&input).unwrap(), Value::Null);

        let assume = SequenceConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
            SequenceNullPolicy::AssumeNonNull,
        );
        let acc = assume
            .try_resolve(&outer, "items", &sequence_of(sub_dst))
            .unwrap()
            .expect("resolved");
        assert!(acc.read(&input).is_err());
    }

    #[test]
    fn sequence_resolver_empty_in_empty_out() {
        let (sub_src, sub_dst) = sub_types();
        let outer = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("items", sequence_of(sub_src.clone()))
                .build(),
        );
        let resolver = SequenceConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
            SequenceNullPolicy::PreserveNull,
        );
        let acc = resolver
            .try_resolve(&outer, "items", &sequence_of(sub_dst))
            .unwrap()
            .expect("resolved");
        let input = struct_value([("items", Value::Seq(vec![]))]);
        assert_eq!(acc.read(&input).unwrap(), Value::Seq(vec![]));
    }

    #[test]
    fn declines_on_type_mismatch() {
        let (sub_src, sub_dst) = sub_types();
        let other = Arc::new(
            TypeDescriptorBuilder::new("Other")
                .field("n", PrimitiveKind::I32)
                .build(),
        );
        let outer = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("value", other)
                .build(),
        );
        let resolver = ObjectConverterResolver::new(
            sub_converter(&sub_src, &sub_dst),
            Arc::new(LenientNameMatcher),
            Arc::new(ShapeCache::new()),
        );
        assert!(resolver
            .try_resolve(&outer, "value", &sub_dst)
            .unwrap()
            .is_none());
    }
}
