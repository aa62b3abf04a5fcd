// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion plans: the chosen recipe for building a destination value.
//!
//! Plan construction runs a small state machine per destination type:
//! Enumerate constructors -> Resolve per parameter -> Disqualify or
//! Accept -> Prioritise. A plan is built fully before anything is
//! cached or registered; a disqualified attempt leaves no state behind.

mod constructor;
mod prioritiser;
mod properties;

pub use constructor::ConstructorPlanBuilder;
pub use prioritiser::{MostResolvedParams, Prioritiser};
pub use properties::PropertySetPlanBuilder;

use crate::resolve::MemberAccessor;
use crate::types::{ConstructorDescriptor, ParameterDescriptor};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Recipe for building a destination value.
#[derive(Debug, Clone)]
pub enum ConversionPlan {
    /// Invoke a matched constructor with resolved arguments.
    Constructor(ConstructorPlan),
    /// Invoke the parameterless constructor, then populate properties.
    PropertySet(PropertySetPlan),
}

impl ConversionPlan {
    /// Deduplicated set of source members the plan actually reads.
    pub fn source_members_read(&self) -> BTreeSet<Arc<str>> {
        let accessors: Box<dyn Iterator<Item = &MemberAccessor>> = match self {
            Self::Constructor(p) => Box::new(p.bindings.iter().map(|b| &b.accessor)),
            Self::PropertySet(p) => Box::new(p.sets.iter().map(|(_, a)| a)),
        };
        accessors
            .filter_map(|a| a.source_member.clone())
            .collect()
    }

    /// Constructor metadata, when this is a constructor plan.
    pub fn constructor(&self) -> Option<&ConstructorDescriptor> {
        match self {
            Self::Constructor(p) => Some(&p.ctor),
            Self::PropertySet(_) => None,
        }
    }
}

/// A constructor invocation with one resolved accessor per parameter.
#[derive(Debug, Clone)]
pub struct ConstructorPlan {
    /// Position of the constructor in enumeration order.
    pub ctor_index: usize,
    /// The constructor itself.
    pub ctor: ConstructorDescriptor,
    /// One binding per parameter, in parameter order.
    pub bindings: Vec<ParamBinding>,
}

impl ConstructorPlan {
    /// Number of parameters populated from the source rather than from
    /// declared defaults. This is the prioritisation score.
    pub fn non_default_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| !b.accessor.from_default)
            .count()
    }
}

/// One parameter slot of a constructor plan.
#[derive(Debug, Clone)]
pub struct ParamBinding {
    /// The parameter being populated.
    pub param: ParameterDescriptor,
    /// The destination field this parameter initializes, when one
    /// name-matches the parameter. A parameter with no backing field is
    /// consumed by the constructor without being stored.
    pub dest_field: Option<Arc<str>>,
    /// The resolved accessor feeding the parameter.
    pub accessor: MemberAccessor,
}

/// A parameterless construction followed by property population.
#[derive(Debug, Clone)]
pub struct PropertySetPlan {
    /// (property name, accessor) pairs, in property declaration order.
    pub sets: Vec<(Arc<str>, MemberAccessor)>,
}
