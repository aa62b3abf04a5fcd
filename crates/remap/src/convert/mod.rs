// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compiled converters.
//!
//! A [`CompiledConverter`] is the realized form of one conversion plan:
//! a reusable, referentially transparent function plus the metadata the
//! projection collaborators consume (constructor/parameter info, the
//! set of source members actually read, the inspectable plan). The
//! function is built on first use, exactly once even under concurrent
//! first access, and is thereafter safe to invoke from any thread
//! without locking.

mod policy;
mod synth;

pub use policy::{
    MapOptions, NullObjectPolicy, OverridePolicy, PlanPreference, PropertyMatchMode,
    SequenceNullPolicy, INITIALISED_FLAG,
};

use crate::error::Result;
use crate::plan::ConversionPlan;
use crate::types::{ConstructorDescriptor, TypeDescriptor, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Realized conversion function.
pub type ConvertFn = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Realized conversion logic for one (source, destination) pair.
pub struct CompiledConverter {
    source: Arc<TypeDescriptor>,
    dest: Arc<TypeDescriptor>,
    options: MapOptions,
    /// None for custom (user-installed) converters.
    plan: Option<ConversionPlan>,
    members_read: BTreeSet<Arc<str>>,
    func: OnceLock<ConvertFn>,
}

impl CompiledConverter {
    /// Wrap a winning plan.
    pub(crate) fn from_plan(
        source: Arc<TypeDescriptor>,
        dest: Arc<TypeDescriptor>,
        plan: ConversionPlan,
        options: MapOptions,
    ) -> Self {
        let members_read = plan.source_members_read();
        Self {
            source,
            dest,
            options,
            plan: Some(plan),
            members_read,
            func: OnceLock::new(),
        }
    }

    /// Wrap a caller-supplied conversion function, bypassing resolution.
    ///
    /// `members_read` must list the source members the function inspects
    /// so projection consumers stay accurate.
    pub fn custom<F>(
        source: Arc<TypeDescriptor>,
        dest: Arc<TypeDescriptor>,
        members_read: impl IntoIterator<Item = Arc<str>>,
        f: F,
    ) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        let func = OnceLock::new();
        let _ = func.set(Box::new(f) as ConvertFn);
        Self {
            source,
            dest,
            options: MapOptions::default(),
            plan: None,
            members_read: members_read.into_iter().collect(),
            func,
        }
    }

    /// Declared source type.
    pub fn source(&self) -> &Arc<TypeDescriptor> {
        &self.source
    }

    /// Declared destination type.
    pub fn dest(&self) -> &Arc<TypeDescriptor> {
        &self.dest
    }

    /// Options the converter was compiled under.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// The inspectable plan. None for custom converters.
    pub fn plan(&self) -> Option<&ConversionPlan> {
        self.plan.as_ref()
    }

    /// Constructor metadata, when a constructor plan won.
    pub fn constructor(&self) -> Option<&ConstructorDescriptor> {
        self.plan.as_ref().and_then(ConversionPlan::constructor)
    }

    /// Deduplicated source members the conversion actually reads.
    pub fn source_members_read(&self) -> &BTreeSet<Arc<str>> {
        &self.members_read
    }

    /// Run the conversion.
    ///
    /// The underlying function is synthesized on first call; the
    /// `OnceLock` guarantees a single build under concurrent first
    /// access. Invocation takes no locks.
    pub fn convert(&self, source: &Value) -> Result<Value> {
        let f = self.func.get_or_init(|| {
            #[allow(clippy::expect_used)] // plan is None only for custom converters, which pre-set func
            let plan = self.plan.as_ref().expect("planned converter");
            synth::compile(plan, &self.dest, &self.options)
        });
        f(source)
    }
}

impl fmt::Debug for CompiledConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledConverter")
            .field("source", &self.source.name)
            .field("dest", &self.dest.name)
            .field("members_read", &self.members_read)
            .field("custom", &self.plan.is_none())
            .finish_non_exhaustive()
    }
}
