// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor-based plan building.

use crate::error::{ConstructorDiagnostic, MapError, Result};
use crate::matcher::NameMatcher;
use crate::plan::{ConstructorPlan, ConversionPlan, ParamBinding, Prioritiser};
use crate::resolve::{default_value_accessor, ResolverChain};
use crate::types::{ShapeCache, TypeDescriptor};
use std::sync::Arc;

/// Enumerates destination constructors, resolves every parameter, and
/// picks the winning fully-resolved candidate.
pub struct ConstructorPlanBuilder<'a> {
    chain: &'a ResolverChain,
    matcher: &'a Arc<dyn NameMatcher>,
    prioritiser: &'a Arc<dyn Prioritiser>,
    shapes: &'a Arc<ShapeCache>,
}

impl<'a> ConstructorPlanBuilder<'a> {
    /// Create a builder over the current registry state.
    pub fn new(
        chain: &'a ResolverChain,
        matcher: &'a Arc<dyn NameMatcher>,
        prioritiser: &'a Arc<dyn Prioritiser>,
        shapes: &'a Arc<ShapeCache>,
    ) -> Self {
        Self {
            chain,
            matcher,
            prioritiser,
            shapes,
        }
    }

    /// Build a constructor plan for `source` -> `dest`.
    ///
    /// An optional parameter no strategy resolves gets a default-value
    /// accessor; a required one disqualifies its constructor. Zero
    /// viable constructors is an error carrying, per attempted
    /// constructor, the first unmatched parameter and why.
    pub fn build(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
    ) -> Result<ConversionPlan> {
        let shape = self
            .shapes
            .shape_of(dest)
            .ok_or_else(|| MapError::invalid(format!("'{}' is not a struct type", dest.name)))?;

        let mut viable: Vec<ConstructorPlan> = Vec::new();
        let mut attempts: Vec<ConstructorDiagnostic> = Vec::new();

        for (index, ctor) in shape.constructors.iter().enumerate() {
            let mut bindings = Vec::with_capacity(ctor.params.len());
            let mut disqualified = false;

            for param in &ctor.params {
                match self.chain.try_resolve(source, &param.name, &param.ty)? {
                    Some(accessor) => {
                        bindings.push(ParamBinding {
                            dest_field: self.dest_field_for(dest, &param.name)?,
                            param: param.clone(),
                            accessor,
                        });
                    }
                    None if param.optional => {
                        bindings.push(ParamBinding {
                            dest_field: self.dest_field_for(dest, &param.name)?,
                            accessor: default_value_accessor(source, param),
                            param: param.clone(),
                        });
                    }
                    None => {
                        attempts.push(ConstructorDiagnostic {
                            index,
                            param_count: ctor.params.len(),
                            unmatched_param: param.name.clone(),
                            reason: format!(
                                "no strategy resolved '{}' from '{}'",
                                param.name, source.name
                            ),
                        });
                        disqualified = true;
                        break;
                    }
                }
            }

            if !disqualified {
                viable.push(ConstructorPlan {
                    ctor_index: index,
                    ctor: ctor.clone(),
                    bindings,
                });
            }
        }

        if viable.is_empty() {
            return Err(MapError::NoViableConstructor {
                dest: dest.name.clone(),
                attempts,
            });
        }

        let winner = if viable.len() == 1 {
            viable.remove(0)
        } else {
            let pick = self.prioritiser.pick(&viable);
            viable.swap_remove(pick)
        };
        log::debug!(
            "[plan] {} -> {}: constructor #{} selected ({}/{} params source-fed)",
            source.name,
            dest.name,
            winner.ctor_index,
            winner.non_default_count(),
            winner.ctor.params.len()
        );
        Ok(ConversionPlan::Constructor(winner))
    }

    /// The destination field a parameter initializes, if one
    /// name-matches it.
    fn dest_field_for(
        &self,
        dest: &TypeDescriptor,
        param_name: &str,
    ) -> Result<Option<Arc<str>>> {
        for field in dest.fields().unwrap_or(&[]) {
            if self.matcher.is_match(&field.name, param_name)? {
                return Ok(Some(field.name.clone()));
            }
        }
        Ok(None)
    }
}
