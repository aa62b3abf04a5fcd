// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member-name matching.
//!
//! Decides whether a source member name and a destination member or
//! parameter name denote the same field. Matching must be deterministic
//! and, in practice, symmetric; the trait does not require commutativity
//! but the built-in matcher provides it.

use crate::error::{MapError, Result};

/// Decides whether two member names denote the same field.
pub trait NameMatcher: Send + Sync {
    /// Compare two member names.
    ///
    /// Both inputs are trimmed first; an input that is empty after
    /// trimming is an `InvalidArgument` error rather than a non-match.
    fn is_match(&self, a: &str, b: &str) -> Result<bool>;
}

/// Default matcher: case-insensitive and underscore-insensitive.
///
/// `sensor_id`, `SensorId`, `SENSORID` and `sensorid` all match each
/// other.
#[derive(Debug, Default, Clone, Copy)]
pub struct LenientNameMatcher;

impl LenientNameMatcher {
    fn canonical(name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MapError::invalid("member name is empty or blank"));
        }
        Ok(trimmed
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect())
    }
}

impl NameMatcher for LenientNameMatcher {
    fn is_match(&self, a: &str, b: &str) -> Result<bool> {
        Ok(Self::canonical(a)? == Self::canonical(b)?)
    }
}
