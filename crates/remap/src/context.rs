// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Caller-owned mapping context: converter cache plus the current
//! registry behind one coarse mutex.
//!
//! The lock is held for the full duration of every facade operation,
//! resolution and synthesis included; registry growth is rare relative
//! to converter invocation, and invocation itself is lock-free once a
//! converter reference is in hand. Hot paths should call
//! [`MapperContext::get_converter`] once and reuse the returned `Arc`.
//!
//! All operations are synchronous: no async scheduling, no
//! cancellation, no timeouts. Resolution completes or fails
//! immediately, and a failure leaves no partial state behind.

use crate::convert::{CompiledConverter, MapOptions, OverridePolicy};
use crate::error::{MapError, Result};
use crate::matcher::{LenientNameMatcher, NameMatcher};
use crate::plan::{MostResolvedParams, Prioritiser};
use crate::registry::ConverterRegistry;
use crate::resolve::MemberResolver;
use crate::types::{ShapeCache, TypeDescriptor, Value};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

type PairKey = (Arc<str>, Arc<str>);

struct State {
    registry: ConverterRegistry,
    cache: HashMap<PairKey, Arc<CompiledConverter>>,
}

/// Conversion context owning learned mappings.
///
/// Explicitly constructed and caller-owned; two contexts share nothing
/// beyond the descriptors passed into both.
pub struct MapperContext {
    state: Mutex<State>,
    base: ConverterRegistry,
    default_options: MapOptions,
}

impl MapperContext {
    /// Context with default matcher, prioritiser, and options.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a context.
    pub fn builder() -> MapperContextBuilder {
        MapperContextBuilder::new()
    }

    /// Build and register a mapping for (source, dest) under the
    /// context's default options.
    pub fn create_map(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
    ) -> Result<Arc<CompiledConverter>> {
        self.create_map_with(source, dest, self.default_options.clone(), OverridePolicy::default())
    }

    /// Build and register a mapping with explicit options and override
    /// policy.
    ///
    /// `UseAnyExistingConverter` is idempotent: a cache hit returns the
    /// cached converter unchanged. `ForceConverterRebuild` discards the
    /// cache entry and recompiles, still growing the registry.
    /// `IgnoreCache` compiles against the current registry without
    /// reading or writing shared state.
    pub fn create_map_with(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
        options: MapOptions,
        policy: OverridePolicy,
    ) -> Result<Arc<CompiledConverter>> {
        validate_pair(source, dest)?;
        let key = pair_key(source, dest);
        let mut state = self.state.lock();

        match policy {
            OverridePolicy::UseAnyExistingConverter => {
                if let Some(hit) = state.cache.get(&key) {
                    log::debug!("[context] {} -> {}: cache hit", source.name, dest.name);
                    return Ok(hit.clone());
                }
            }
            OverridePolicy::ForceConverterRebuild => {
                state.cache.remove(&key);
            }
            OverridePolicy::IgnoreCache => {
                let plan = state.registry.build_plan(source, dest, &options)?;
                return Ok(Arc::new(CompiledConverter::from_plan(
                    source.clone(),
                    dest.clone(),
                    plan,
                    options,
                )));
            }
        }

        let plan = state.registry.build_plan(source, dest, &options)?;
        let converter = Arc::new(CompiledConverter::from_plan(
            source.clone(),
            dest.clone(),
            plan,
            options,
        ));
        state.registry = state.registry.with_converter(converter.clone());
        state.cache.insert(key, converter.clone());
        log::debug!("[context] {} -> {}: compiled", source.name, dest.name);
        Ok(converter)
    }

    /// Convert one instance. Equivalent to `get_converter` then invoke.
    pub fn convert(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
        instance: &Value,
    ) -> Result<Value> {
        self.convert_with(source, dest, instance, OverridePolicy::default())
    }

    /// Convert one instance under an explicit override policy.
    pub fn convert_with(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
        instance: &Value,
        policy: OverridePolicy,
    ) -> Result<Value> {
        let converter = self.get_converter_with(source, dest, policy)?;
        converter.convert(instance)
    }

    /// Reusable converter reference for (source, dest), compiling it if
    /// the context does not know the pair yet. Recommended for repeated
    /// use: invocation through the returned `Arc` bypasses this
    /// context's lock entirely.
    pub fn get_converter(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
    ) -> Result<Arc<CompiledConverter>> {
        self.get_converter_with(source, dest, OverridePolicy::default())
    }

    /// Converter reference under an explicit override policy.
    pub fn get_converter_with(
        &self,
        source: &Arc<TypeDescriptor>,
        dest: &Arc<TypeDescriptor>,
        policy: OverridePolicy,
    ) -> Result<Arc<CompiledConverter>> {
        self.create_map_with(source, dest, self.default_options.clone(), policy)
    }

    /// Install a converter for its declared pair, bypassing resolution.
    /// Replaces any cached converter and still grows the registry, so
    /// outer types can delegate to the installed converter.
    pub fn set_converter(&self, converter: Arc<CompiledConverter>) -> Result<()> {
        validate_pair(converter.source(), converter.dest())?;
        let key = pair_key(converter.source(), converter.dest());
        let mut state = self.state.lock();
        state.registry = state.registry.with_converter(converter.clone());
        state.cache.insert(key, converter);
        Ok(())
    }

    /// Discard every learned mapping and restore the base
    /// configuration. The only way to drop learned state wholesale;
    /// per-pair discarding is limited to the override policies on
    /// `create_map`.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.registry = self.base.clone();
        state.cache.clear();
        log::debug!("[context] reset to base configuration");
    }

    /// Number of cached converters.
    pub fn converter_count(&self) -> usize {
        self.state.lock().cache.len()
    }
}

impl Default for MapperContext {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_key(source: &Arc<TypeDescriptor>, dest: &Arc<TypeDescriptor>) -> PairKey {
    (source.name.clone(), dest.name.clone())
}

fn validate_pair(source: &Arc<TypeDescriptor>, dest: &Arc<TypeDescriptor>) -> Result<()> {
    if source.name.trim().is_empty() || dest.name.trim().is_empty() {
        return Err(MapError::invalid("type name is empty or blank"));
    }
    Ok(())
}

/// Fluent configuration for [`MapperContext`].
pub struct MapperContextBuilder {
    matcher: Arc<dyn NameMatcher>,
    prioritiser: Arc<dyn Prioritiser>,
    external: Option<Arc<dyn MemberResolver>>,
    options: MapOptions,
}

impl MapperContextBuilder {
    /// Defaults: lenient matcher, most-resolved-params prioritiser, no
    /// external adapter.
    pub fn new() -> Self {
        Self {
            matcher: Arc::new(LenientNameMatcher),
            prioritiser: Arc::new(MostResolvedParams),
            external: None,
            options: MapOptions::default(),
        }
    }

    /// Replace the name matcher.
    pub fn matcher(mut self, matcher: Arc<dyn NameMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Replace the prioritiser.
    pub fn prioritiser(mut self, prioritiser: Arc<dyn Prioritiser>) -> Self {
        self.prioritiser = prioritiser;
        self
    }

    /// Install an external mapping-engine adapter at the lowest
    /// priority. The adapter must verify feasibility itself before
    /// returning a match.
    pub fn external_resolver(mut self, resolver: Arc<dyn MemberResolver>) -> Self {
        self.external = Some(resolver);
        self
    }

    /// Default `MapOptions` applied when none are passed explicitly.
    pub fn default_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the context.
    pub fn build(self) -> MapperContext {
        let shapes = Arc::new(ShapeCache::new());
        let base = ConverterRegistry::base(self.matcher, self.prioritiser, shapes, self.external);
        MapperContext {
            state: Mutex::new(State {
                registry: base.clone(),
                cache: HashMap::new(),
            }),
            base,
            default_options: self.options,
        }
    }
}

impl Default for MapperContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
