// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property-setting plan building (the constructor-path fallback).

use crate::convert::{MapOptions, PropertyMatchMode};
use crate::error::{MapError, Result};
use crate::plan::{ConversionPlan, PropertySetPlan};
use crate::resolve::ResolverChain;
use crate::types::{ShapeCache, TypeDescriptor};
use std::sync::Arc;

/// Builds a parameterless-constructor-then-populate plan.
pub struct PropertySetPlanBuilder<'a> {
    chain: &'a ResolverChain,
    shapes: &'a Arc<ShapeCache>,
}

impl<'a> PropertySetPlanBuilder<'a> {
    /// Create a builder over the current registry state.
    pub fn new(chain: &'a ResolverChain, shapes: &'a Arc<ShapeCache>) -> Self {
        Self { chain, shapes }
    }

    /// Build a property-set plan for `source` -> `dest`.
    ///
    /// Requires a public parameterless constructor. Resolves an accessor
    /// per public, non-indexed, writable destination property not in the
    /// ignore set. Under `MatchAll` an unresolved property aborts the
    /// plan; under `MatchAsManyAsPossible` it is skipped silently.
    pub fn build(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
        options: &MapOptions,
    ) -> Result<ConversionPlan> {
        let shape = self
            .shapes
            .shape_of(dest)
            .ok_or_else(|| MapError::invalid(format!("'{}' is not a struct type", dest.name)))?;

        if shape.parameterless.is_none() {
            return Err(MapError::NoParameterlessConstructor {
                dest: dest.name.clone(),
            });
        }

        let mut sets = Vec::with_capacity(shape.writable.len());
        for property in &shape.writable {
            if options.ignored.contains(property.name.as_ref()) {
                continue;
            }
            match self
                .chain
                .try_resolve(source, &property.name, &property.ty)?
            {
                Some(accessor) => sets.push((property.name.clone(), accessor)),
                None => match options.match_mode {
                    PropertyMatchMode::MatchAll => {
                        return Err(MapError::UnableToMapProperty {
                            dest: dest.name.clone(),
                            property: property.name.clone(),
                        });
                    }
                    PropertyMatchMode::MatchAsManyAsPossible => {
                        log::debug!(
                            "[plan] {} -> {}: property '{}' unresolved, skipped",
                            source.name,
                            dest.name,
                            property.name
                        );
                    }
                },
            }
        }

        log::debug!(
            "[plan] {} -> {}: property-set plan with {} properties",
            source.name,
            dest.name,
            sets.len()
        );
        Ok(ConversionPlan::PropertySet(PropertySetPlan { sets }))
    }
}
