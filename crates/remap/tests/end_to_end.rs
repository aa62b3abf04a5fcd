// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end mapping scenarios through the public facade.

use remap::{
    struct_value, sequence_of, EnumBuilder, InterimTypeFactory, MapOptions, MapperContext,
    NullObjectPolicy, OverridePolicy, PrimitiveKind, TypeDescriptor, TypeDescriptorBuilder, Value,
    INITIALISED_FLAG,
};
use remap::types::{opt_param, param, primitive};
use std::sync::Arc;

fn sub_source() -> Arc<TypeDescriptor> {
    TypeDescriptorBuilder::new("Sub1").string_field("name").build_arc()
}

fn sub_dest() -> Arc<TypeDescriptor> {
    TypeDescriptorBuilder::new("Sub1Dto").string_field("name").build_arc()
}

fn sub(name: &str) -> Value {
    struct_value([("name", Value::String(name.into()))])
}

#[test]
fn create_map_twice_returns_same_converter_identity() {
    let ctx = MapperContext::new();
    let source = sub_source();
    let dest = sub_dest();

    let first = ctx.create_map(&source, &dest).unwrap();
    let second = ctx.create_map(&source, &dest).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn resolution_is_deterministic_for_fixed_registry_state() {
    let source = TypeDescriptorBuilder::new("Reading")
        .field("id", PrimitiveKind::U32)
        .string_field("label")
        .build_arc();
    let dest = TypeDescriptorBuilder::new("ReadingDto")
        .field("id", PrimitiveKind::U32)
        .string_field("label")
        .constructor(vec![param("id", primitive(PrimitiveKind::U32))])
        .constructor(vec![
            param("id", primitive(PrimitiveKind::U32)),
            param("label", primitive(PrimitiveKind::String)),
        ])
        .build_arc();

    let ctx = MapperContext::new();
    let a = ctx
        .create_map_with(&source, &dest, MapOptions::default(), OverridePolicy::IgnoreCache)
        .unwrap();
    let b = ctx
        .create_map_with(&source, &dest, MapOptions::default(), OverridePolicy::IgnoreCache)
        .unwrap();

    // Same constructor chosen, same source members read.
    assert_eq!(
        a.constructor().map(|c| c.params.len()),
        b.constructor().map(|c| c.params.len())
    );
    assert_eq!(a.source_members_read(), b.source_members_read());

    let input = struct_value([
        ("id", Value::U32(7)),
        ("label", Value::String("t".into())),
    ]);
    assert_eq!(a.convert(&input).unwrap(), b.convert(&input).unwrap());
}

#[test]
fn null_source_yields_null_under_default_policy() {
    let ctx = MapperContext::new();
    let converter = ctx.get_converter(&sub_source(), &sub_dest()).unwrap();
    assert_eq!(converter.convert(&Value::Null).unwrap(), Value::Null);
}

#[test]
fn null_source_yields_flagged_empty_instance() {
    let ctx = MapperContext::new();
    let options =
        MapOptions::default().null_object(NullObjectPolicy::EmptyInstanceWithFlag);
    let converter = ctx
        .create_map_with(
            &sub_source(),
            &sub_dest(),
            options,
            OverridePolicy::UseAnyExistingConverter,
        )
        .unwrap();

    let out = converter.convert(&Value::Null).unwrap();
    assert_eq!(out.get_field(INITIALISED_FLAG), Some(&Value::Bool(false)));
    assert_eq!(out.get_field("name"), Some(&Value::String(String::new())));

    // A live conversion flags the instance as initialised.
    let out = converter.convert(&sub("Bo1")).unwrap();
    assert_eq!(out.get_field(INITIALISED_FLAG), Some(&Value::Bool(true)));
}

#[test]
fn sequences_map_element_wise_preserving_length_and_order() {
    let source = TypeDescriptorBuilder::new("Batch")
        .sequence_field("items", sub_source())
        .build_arc();
    let dest = TypeDescriptorBuilder::new("BatchDto")
        .sequence_field("items", sub_dest())
        .build_arc();

    let ctx = MapperContext::new();
    // Element converter must be known before the outer mapping resolves.
    ctx.create_map(&sub_source(), &sub_dest()).unwrap();
    let converter = ctx.get_converter(&source, &dest).unwrap();

    for names in [&[][..], &["a"][..], &["a", "b", "c"][..]] {
        let items: Vec<Value> = names.iter().map(|n| sub(n)).collect();
        let out = converter
            .convert(&struct_value([("items", Value::Seq(items))]))
            .unwrap();
        match out.get_field("items") {
            Some(Value::Seq(mapped)) => {
                assert_eq!(mapped.len(), names.len());
                for (value, name) in mapped.iter().zip(names) {
                    assert_eq!(value.get_field("name"), Some(&Value::String((*name).into())));
                }
            }
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    // Null sequence in, null sequence out.
    let out = converter
        .convert(&struct_value([("items", Value::Null)]))
        .unwrap();
    assert_eq!(out.get_field("items"), Some(&Value::Null));
}

#[test]
fn richest_resolvable_constructor_wins() {
    let source = TypeDescriptorBuilder::new("Pair")
        .field("a", PrimitiveKind::I32)
        .field("b", PrimitiveKind::I32)
        .build_arc();
    let dest = TypeDescriptorBuilder::new("PairDto")
        .field("a", PrimitiveKind::I32)
        .field("b", PrimitiveKind::I32)
        .constructor(vec![param("a", primitive(PrimitiveKind::I32))])
        .constructor(vec![
            param("a", primitive(PrimitiveKind::I32)),
            param("b", primitive(PrimitiveKind::I32)),
        ])
        .build_arc();

    let ctx = MapperContext::new();
    let converter = ctx.get_converter(&source, &dest).unwrap();
    assert_eq!(converter.constructor().map(|c| c.params.len()), Some(2));

    let out = converter
        .convert(&struct_value([("a", Value::I32(1)), ("b", Value::I32(2))]))
        .unwrap();
    assert_eq!(out.get_field("b"), Some(&Value::I32(2)));
}

#[test]
fn enum_members_translate_by_name_not_ordinal() {
    let source_enum = EnumBuilder::new("SourceEnum")
        .variant("EnumValue1")
        .variant("EnumValue2")
        .variant("EnumValue3")
        .build_arc();
    let dest_enum = EnumBuilder::new("DestEnum")
        .variant_value("EnumValue2", 55)
        .variant_value("EnumValue3", 101)
        .build_arc();

    let source = TypeDescriptorBuilder::new("Evt")
        .field_with_type("kind", source_enum)
        .build_arc();
    let dest = TypeDescriptorBuilder::new("EvtDto")
        .field_with_type("kind", dest_enum)
        .build_arc();

    let ctx = MapperContext::new();
    let out = ctx
        .convert(
            &source,
            &dest,
            &struct_value([("kind", Value::Enum(2, "EnumValue3".into()))]),
        )
        .unwrap();
    assert_eq!(out.get_field("kind"), Some(&Value::Enum(101, "EnumValue3".into())));
}

// The full scenario: nested member, element-wise sequence, and enum
// translation feeding one constructor-based destination.
#[test]
fn nested_member_sequence_and_enum_compose() {
    let source_enum = EnumBuilder::new("SourceEnum")
        .variant("EnumValue1")
        .variant("EnumValue2")
        .variant("EnumValue3")
        .build_arc();
    let dest_enum = EnumBuilder::new("DestEnum")
        .variant_value("EnumValue3", 101)
        .build_arc();
    let sub_src = sub_source();
    let sub_dst = sub_dest();

    let source = TypeDescriptorBuilder::new("Outer")
        .field_with_type("value", sub_src.clone())
        .sequence_field("value_list", sub_src.clone())
        .field_with_type("enum_value", source_enum)
        .build_arc();
    let dest = TypeDescriptorBuilder::new("OuterDto")
        .field_with_type("value", sub_dst.clone())
        .sequence_field("value_list", sub_dst.clone())
        .field_with_type("enum_value", dest_enum.clone())
        .constructor(vec![
            param("value", sub_dst.clone()),
            param("value_list", sequence_of(sub_dst.clone())),
            param("enum_value", dest_enum),
        ])
        .build_arc();

    let ctx = MapperContext::new();
    ctx.create_map(&sub_src, &sub_dst).unwrap();
    let converter = ctx.get_converter(&source, &dest).unwrap();
    assert!(converter.constructor().is_some());

    let out = converter
        .convert(&struct_value([
            ("value", sub("Bo1")),
            ("value_list", Value::Seq(vec![sub("Bo2"), sub("Bo3")])),
            ("enum_value", Value::Enum(2, "EnumValue3".into())),
        ]))
        .unwrap();

    assert_eq!(
        out.get_field("value").and_then(|v| v.get_field("name")),
        Some(&Value::String("Bo1".into()))
    );
    match out.get_field("value_list") {
        Some(Value::Seq(list)) => {
            assert_eq!(list.len(), 2);
            assert_eq!(list[0].get_field("name"), Some(&Value::String("Bo2".into())));
            assert_eq!(list[1].get_field("name"), Some(&Value::String("Bo3".into())));
        }
        other => panic!("expected sequence, got {other:?}"),
    }
    assert_eq!(
        out.get_field("enum_value").and_then(Value::enum_value),
        Some(101)
    );
}

#[test]
fn interim_type_identity_is_order_independent() {
    let factory = InterimTypeFactory::new();
    let int = primitive(PrimitiveKind::I32);
    let text = primitive(PrimitiveKind::String);

    let a = factory
        .interim_type(&[("total".into(), int.clone()), ("label".into(), text.clone())])
        .unwrap();
    let b = factory
        .interim_type(&[("label".into(), text), ("total".into(), int)])
        .unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn optional_parameter_falls_back_to_declared_default() {
    let source = TypeDescriptorBuilder::new("Partial")
        .field("a", PrimitiveKind::I32)
        .build_arc();
    let dest = TypeDescriptorBuilder::new("PartialDto")
        .field("a", PrimitiveKind::I32)
        .field("b", PrimitiveKind::I32)
        .constructor(vec![
            param("a", primitive(PrimitiveKind::I32)),
            opt_param("b", primitive(PrimitiveKind::I32), Some(Value::I32(42))),
        ])
        .build_arc();

    let ctx = MapperContext::new();
    let out = ctx
        .convert(&source, &dest, &struct_value([("a", Value::I32(1))]))
        .unwrap();
    assert_eq!(out.get_field("b"), Some(&Value::I32(42)));
}
