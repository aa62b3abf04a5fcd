// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Plan-to-function synthesis.
//!
//! Compiles a winning [`ConversionPlan`] into a single reusable
//! conversion function. Accessors are already pre-bound, so the
//! compiled function performs no name matching and no strategy search:
//! it tests the source for null, then runs each accessor into its
//! destination slot.

use crate::convert::{ConvertFn, MapOptions, NullObjectPolicy, INITIALISED_FLAG};
use crate::plan::ConversionPlan;
use crate::resolve::MemberAccessor;
use crate::types::{TypeDescriptor, Value};
use std::sync::Arc;

/// What a null source produces under the object policy.
///
/// The zero value of an object type is null; the empty-instance policy
/// manufactures a zeroed, non-null instance carrying a false
/// [`INITIALISED_FLAG`] instead, for consumers that cannot branch on
/// null.
fn null_result(dest: &TypeDescriptor, policy: NullObjectPolicy) -> Value {
    match policy {
        NullObjectPolicy::UseDestDefault => Value::Null,
        NullObjectPolicy::EmptyInstanceWithFlag => {
            let mut v = Value::default_of(dest);
            v.set_field(INITIALISED_FLAG, Value::Bool(false));
            v
        }
    }
}

/// Compile a plan into its conversion function.
pub(crate) fn compile(
    plan: &ConversionPlan,
    dest: &Arc<TypeDescriptor>,
    options: &MapOptions,
) -> ConvertFn {
    let dest = dest.clone();
    let on_null = null_result(&dest, options.null_object);
    let flagged = options.null_object == NullObjectPolicy::EmptyInstanceWithFlag;

    // Both plan forms reduce to (destination slot, accessor) pairs; a
    // constructor parameter without a backing field is consumed without
    // being stored.
    let slots: Vec<(Option<Arc<str>>, MemberAccessor)> = match plan {
        ConversionPlan::Constructor(p) => p
            .bindings
            .iter()
            .map(|b| (b.dest_field.clone(), b.accessor.clone()))
            .collect(),
        ConversionPlan::PropertySet(p) => p
            .sets
            .iter()
            .map(|(name, acc)| (Some(name.clone()), acc.clone()))
            .collect(),
    };

    Box::new(move |source: &Value| {
        if source.is_null() {
            return Ok(on_null.clone());
        }
        let mut out = Value::default_of(&dest);
        for (slot, accessor) in &slots {
            let value = accessor.read(source)?;
            if let Some(name) = slot {
                out.set_field(name.as_ref(), value);
            }
        }
        if flagged {
            out.set_field(INITIALISED_FLAG, Value::Bool(true));
        }
        Ok(out)
    })
}
