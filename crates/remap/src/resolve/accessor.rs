// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved member accessors.
//!
//! A [`MemberAccessor`] is one fully resolved strategy for reading a
//! named member off a source instance, including any value conversion
//! it needs. Accessors are produced during resolution and owned by the
//! plan that uses them; the embedded read function is pre-bound so that
//! invocation performs no name matching or strategy search.

use crate::error::Result;
use crate::types::{TypeDescriptor, Value};
use std::fmt;
use std::sync::Arc;

/// Pre-bound member read function.
pub type ReadFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// One resolved field-read strategy.
#[derive(Clone)]
pub struct MemberAccessor {
    /// Source type the accessor reads from.
    pub source_type: Arc<TypeDescriptor>,
    /// Type of the value the accessor produces. Assignable to the
    /// consuming parameter/property type by construction.
    pub target_type: Arc<TypeDescriptor>,
    /// Source member read, when the accessor inspects the source at all
    /// (default-value accessors do not).
    pub source_member: Option<Arc<str>>,
    /// Whether a null member value is forwarded as-is rather than
    /// converted.
    pub forwards_null: bool,
    /// Whether this accessor is a default-value fallback that ignores
    /// the source instance. Default-sourced accessors lose priority
    /// during constructor selection.
    pub from_default: bool,
    read: ReadFn,
}

impl MemberAccessor {
    /// Create an accessor over a pre-bound read function.
    pub fn new(
        source_type: Arc<TypeDescriptor>,
        target_type: Arc<TypeDescriptor>,
        source_member: Option<Arc<str>>,
        read: ReadFn,
    ) -> Self {
        Self {
            source_type,
            target_type,
            source_member,
            forwards_null: false,
            from_default: false,
            read,
        }
    }

    /// Mark the accessor as forwarding null member values.
    pub fn forwarding_null(mut self) -> Self {
        self.forwards_null = true;
        self
    }

    /// Mark the accessor as a default-value fallback.
    pub fn defaulted(mut self) -> Self {
        self.from_default = true;
        self
    }

    /// Read the member off a source instance.
    ///
    /// Failures here are value-time failures and propagate unmodified;
    /// resolution-time success never guarantees value-time success.
    pub fn read(&self, source: &Value) -> Result<Value> {
        (self.read)(source)
    }
}

impl fmt::Debug for MemberAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberAccessor")
            .field("source_type", &self.source_type.name)
            .field("target_type", &self.target_type.name)
            .field("source_member", &self.source_member)
            .field("forwards_null", &self.forwards_null)
            .field("from_default", &self.from_default)
            .finish_non_exhaustive()
    }
}
