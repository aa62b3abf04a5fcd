// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Immutable converter registries.
//!
//! A registry is the current snapshot of resolver strategies plus the
//! policy objects (name matcher, prioritiser). It is a value: extension
//! returns a new registry and never mutates the old one, so a plan
//! compiled against an older snapshot stays valid forever.

use crate::convert::{CompiledConverter, MapOptions, PlanPreference};
use crate::error::{MapError, Result};
use crate::matcher::NameMatcher;
use crate::plan::{
    ConstructorPlanBuilder, ConversionPlan, Prioritiser, PropertySetPlanBuilder,
};
use crate::resolve::{
    DirectAssignResolver, EnumTranslateResolver, MemberResolver, ObjectConverterResolver,
    ResolverChain, SequenceConverterResolver,
};
use crate::types::{ShapeCache, TypeDescriptor};
use std::sync::Arc;

/// Immutable snapshot of resolver strategies and policies.
#[derive(Clone)]
pub struct ConverterRegistry {
    matcher: Arc<dyn NameMatcher>,
    prioritiser: Arc<dyn Prioritiser>,
    shapes: Arc<ShapeCache>,
    chain: ResolverChain,
}

impl ConverterRegistry {
    /// Base registry: direct assignment, then enum translation, then
    /// (lowest priority) an optional external adapter.
    pub fn base(
        matcher: Arc<dyn NameMatcher>,
        prioritiser: Arc<dyn Prioritiser>,
        shapes: Arc<ShapeCache>,
        external: Option<Arc<dyn MemberResolver>>,
    ) -> Self {
        let mut chain = ResolverChain::new(vec![
            Arc::new(DirectAssignResolver::new(matcher.clone(), shapes.clone())),
            Arc::new(EnumTranslateResolver::new(matcher.clone(), shapes.clone())),
        ]);
        if let Some(external) = external {
            chain = chain.appended(external);
        }
        Self {
            matcher,
            prioritiser,
            shapes,
            chain,
        }
    }

    /// The name matcher in effect.
    pub fn matcher(&self) -> &Arc<dyn NameMatcher> {
        &self.matcher
    }

    /// The resolver chain in effect.
    pub fn chain(&self) -> &ResolverChain {
        &self.chain
    }

    /// The shared shape cache.
    pub fn shapes(&self) -> &Arc<ShapeCache> {
        &self.shapes
    }

    /// New registry that additionally knows `converter`.
    ///
    /// Prepends an object-level and a sequence-level strategy wrapping
    /// the converter, so outer types can delegate nested and
    /// sequence-valued members to it. The receiver is untouched.
    pub fn with_converter(&self, converter: Arc<CompiledConverter>) -> Self {
        let sequence = SequenceConverterResolver::new(
            converter.clone(),
            self.matcher.clone(),
            self.shapes.clone(),
            converter.options().null_sequence,
        );
        let object = ObjectConverterResolver::new(
            converter.clone(),
            self.matcher.clone(),
            self.shapes.clone(),
        );
        log::debug!(
            "[registry] learned {} -> {} ({} strategies)",
            converter.source().name,
            converter.dest().name,
            self.chain.len() + 2
        );
        Self {
            matcher: self.matcher.clone(),
            prioritiser: self.prioritiser.clone(),
            shapes: self.shapes.clone(),
            chain: self
                .chain
                .prepended(Arc::new(sequence))
                .prepended(Arc::new(object)),
        }
    }

    /// Build the winning plan for a (source, dest) pair under `options`.
    ///
    /// Constructor plans are attempted first; when every constructor is
    /// disqualified the property-set fallback runs, and if that fails
    /// too the constructor diagnostics are what surfaces.
    pub fn build_plan(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
        options: &MapOptions,
    ) -> Result<ConversionPlan> {
        let properties = PropertySetPlanBuilder::new(&self.chain, &self.shapes);
        if options.plan == PlanPreference::PropertiesOnly {
            return properties.build(source, dest, options);
        }

        let constructors = ConstructorPlanBuilder::new(
            &self.chain,
            &self.matcher,
            &self.prioritiser,
            &self.shapes,
        );
        match constructors.build(source, dest) {
            Ok(plan) => Ok(plan),
            Err(ctor_err @ MapError::NoViableConstructor { .. }) => {
                match properties.build(source, dest, options) {
                    Ok(plan) => Ok(plan),
                    Err(_) => Err(ctor_err),
                }
            }
            Err(other) => Err(other),
        }
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::LenientNameMatcher;
    use crate::plan::MostResolvedParams;
    use crate::types::{struct_value, PrimitiveKind, TypeDescriptorBuilder, Value};

    fn base() -> ConverterRegistry {
        ConverterRegistry::base(
            Arc::new(LenientNameMatcher),
            Arc::new(MostResolvedParams),
            Arc::new(ShapeCache::new()),
            None,
        )
    }

    #[test]
    fn extension_leaves_original_untouched() {
        let registry = base();
        let before = registry.chain().len();

        let ty = Arc::new(
            TypeDescriptorBuilder::new("T")
                .field("n", PrimitiveKind::I32)
                .build(),
        );
        let converter = Arc::new(CompiledConverter::custom(
            ty.clone(),
            ty,
            [],
            |v| Ok(v.clone()),
        ));
        let extended = registry.with_converter(converter);

        assert_eq!(registry.chain().len(), before);
        assert_eq!(extended.chain().len(), before + 2);
    }

    #[test]
    fn parameterless_constructor_remains_viable() {
        let registry = base();
        let source = Arc::new(
            TypeDescriptorBuilder::new("Src")
                .field("a", PrimitiveKind::I32)
                .build(),
        );
        // The richer constructor needs a member the source lacks; the
        // declared parameterless one stays viable.
        let dest = Arc::new(
            TypeDescriptorBuilder::new("Dest")
                .field("a", PrimitiveKind::I32)
                .field("b", PrimitiveKind::F64)
                .constructor(vec![crate::types::param(
                    "missing",
                    crate::types::primitive(PrimitiveKind::I32),
                )])
                .parameterless_constructor()
                .build(),
        );

        let plan = registry
            .build_plan(&source, &dest, &MapOptions::new())
            .unwrap();
        assert!(matches!(plan, ConversionPlan::Constructor(_)));
    }

    #[test]
    fn constructor_diagnostics_surface_when_fallback_fails_too() {
        let registry = base();
        let source = Arc::new(
            TypeDescriptorBuilder::new("Src")
                .field("a", PrimitiveKind::I32)
                .build(),
        );
        // Single disqualified constructor and no parameterless one:
        // the property fallback cannot run, so the constructor
        // diagnostics are what surfaces.
        let strict_dest = Arc::new(
            TypeDescriptorBuilder::new("StrictDest")
                .field("a", PrimitiveKind::I32)
                .constructor(vec![crate::types::param(
                    "missing",
                    crate::types::primitive(PrimitiveKind::I32),
                )])
                .build(),
        );

        let err = registry
            .build_plan(&source, &strict_dest, &MapOptions::new())
            .unwrap_err();
        match err {
            MapError::NoViableConstructor { attempts, .. } => {
                assert_eq!(attempts.len(), 1);
                assert_eq!(attempts[0].unmatched_param.as_ref(), "missing");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn learned_converter_resolves_nested_member() {
        let registry = base();
        let sub = Arc::new(
            TypeDescriptorBuilder::new("Sub")
                .string_field("name")
                .build(),
        );
        let sub_conv = Arc::new(CompiledConverter::custom(
            sub.clone(),
            sub.clone(),
            [Arc::<str>::from("name")],
            |v| Ok(v.clone()),
        ));
        let registry = registry.with_converter(sub_conv);

        let source = Arc::new(
            TypeDescriptorBuilder::new("Outer")
                .field_with_type("value", sub.clone())
                .build(),
        );
        let acc = registry
            .chain()
            .try_resolve(&source, "value", &sub)
            .unwrap()
            .expect("nested member resolved");
        let input = struct_value([("value", struct_value([("name", Value::from("Bo1"))]))]);
        let out = acc.read(&input).unwrap();
        assert_eq!(out.get_field("name"), Some(&Value::String("Bo1".into())));
    }
}
