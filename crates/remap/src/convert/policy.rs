// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Null-handling, cache-override and match-mode policies.

use std::collections::BTreeSet;

/// Name of the synthetic boolean field carried by converters running
/// under [`NullObjectPolicy::EmptyInstanceWithFlag`]. Consumers that
/// cannot emit a conditional null test this flag instead.
pub const INITIALISED_FLAG: &str = "is_initialised";

/// What a whole-object conversion produces for a null source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullObjectPolicy {
    /// Null source yields the destination's zero value.
    #[default]
    UseDestDefault,
    /// Null source yields a non-null instance with every mapped property
    /// zeroed and [`INITIALISED_FLAG`] set `false`; successful
    /// conversions set the flag `true`.
    ///
    /// Required where the consumer cannot emit a conditional null
    /// (e.g. a compiled-query context); a wrapping converter re-applies
    /// the null check by testing the flag.
    EmptyInstanceWithFlag,
}

/// What an element-wise sequence conversion does with a null input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceNullPolicy {
    /// Null in, null out; non-null in, element-wise mapped out.
    #[default]
    PreserveNull,
    /// Skip the null check entirely. Required where conditional
    /// branching on null is disallowed; feeding a null sequence through
    /// such a converter is a caller error.
    AssumeNonNull,
}

/// Cache interaction for `create_map`/`get_converter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    /// Cache hit is a no-op returning the cached converter unchanged
    /// (idempotent).
    #[default]
    UseAnyExistingConverter,
    /// Discard any cache entry, recompile, and still grow the registry.
    ForceConverterRebuild,
    /// Compile without reading or writing the shared cache or registry.
    /// For transient mappings.
    IgnoreCache,
}

/// How a property-set plan treats unresolved writable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyMatchMode {
    /// Unresolved properties are skipped silently.
    #[default]
    MatchAsManyAsPossible,
    /// Any unresolved writable property aborts the plan.
    MatchAll,
}

/// Which plan builders a mapping request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanPreference {
    /// Constructor plans first, property-set plan as fallback.
    #[default]
    ConstructorFirst,
    /// Property-set plan only (requires a parameterless constructor).
    PropertiesOnly,
}

/// Per-mapping configuration. Fluent-builder style.
#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    /// Destination properties excluded from property-set plans.
    pub ignored: BTreeSet<String>,
    /// Unresolved-property handling.
    pub match_mode: PropertyMatchMode,
    /// Null-source handling for the whole object.
    pub null_object: NullObjectPolicy,
    /// Null handling for element-wise sequence delegation.
    pub null_sequence: SequenceNullPolicy,
    /// Plan builder selection.
    pub plan: PlanPreference,
}

impl MapOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a destination property from property-set plans.
    pub fn ignore(mut self, property: impl Into<String>) -> Self {
        self.ignored.insert(property.into());
        self
    }

    /// Set the unresolved-property mode.
    pub fn match_mode(mut self, mode: PropertyMatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the whole-object null policy.
    pub fn null_object(mut self, policy: NullObjectPolicy) -> Self {
        self.null_object = policy;
        self
    }

    /// Set the sequence null policy.
    pub fn null_sequence(mut self, policy: SequenceNullPolicy) -> Self {
        self.null_sequence = policy;
        self
    }

    /// Set the plan preference.
    pub fn plan(mut self, plan: PlanPreference) -> Self {
        self.plan = plan;
        self
    }
}
