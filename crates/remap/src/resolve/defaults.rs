// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Default-value fallback for optional constructor parameters.

use crate::resolve::MemberAccessor;
use crate::types::{ParameterDescriptor, TypeDescriptor, Value};
use std::sync::Arc;

/// Accessor yielding an optional parameter's declared default (or the
/// zero value of its type when none is declared).
///
/// Always matches, never inspects the source instance, and therefore
/// tolerates a null source. The constructor plan builder applies this
/// only after every other strategy has declined for an optional
/// parameter.
pub fn default_value_accessor(
    source: &Arc<TypeDescriptor>,
    param: &ParameterDescriptor,
) -> MemberAccessor {
    let value = param
        .default
        .clone()
        .unwrap_or_else(|| Value::default_of(&param.ty));

    MemberAccessor::new(
        source.clone(),
        param.ty.clone(),
        None,
        Arc::new(move |_source: &Value| Ok(value.clone())),
    )
    .defaulted()
}
