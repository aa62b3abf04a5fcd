// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for plan resolution and conversion.
//!
//! Failures are all-or-nothing: nothing partial is ever cached or
//! registered, and there are no retries. A failed mapping is fixed by
//! caller configuration (`set_converter`, extra resolvers, ignore lists)
//! and re-invoked explicitly.

use std::fmt;
use std::sync::Arc;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MapError>;

/// Why one attempted constructor was disqualified.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDiagnostic {
    /// Constructor position in declaration order.
    pub index: usize,
    /// Total parameter count of that constructor.
    pub param_count: usize,
    /// First parameter no strategy could resolve.
    pub unmatched_param: Arc<str>,
    /// Human-readable reason the parameter stayed unresolved.
    pub reason: String,
}

impl fmt::Display for ConstructorDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "constructor #{} ({} params): parameter '{}' unresolved ({})",
            self.index, self.param_count, self.unmatched_param, self.reason
        )
    }
}

/// Mapper failure modes.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// No destination constructor had every parameter resolvable or
    /// defaultable. Carries one diagnostic per attempted constructor.
    NoViableConstructor {
        /// Destination type name.
        dest: Arc<str>,
        /// Per-constructor disqualification details.
        attempts: Vec<ConstructorDiagnostic>,
    },
    /// A property-set plan was requested but the destination has no
    /// public parameterless constructor.
    NoParameterlessConstructor {
        /// Destination type name.
        dest: Arc<str>,
    },
    /// Strict property matching hit a writable property no strategy
    /// could resolve.
    UnableToMapProperty {
        /// Destination type name.
        dest: Arc<str>,
        /// The offending property.
        property: Arc<str>,
    },
    /// Null, empty, or otherwise invalid required input at a public
    /// entry point. Checked eagerly before any partial work.
    InvalidArgument(String),
    /// A resolved accessor failed during actual invocation. Resolution
    /// success never guarantees value-time success; this propagates the
    /// failure unmodified.
    ConversionFailed {
        /// Where the failure happened (member or converter name).
        context: String,
        /// Underlying message.
        message: String,
    },
}

impl MapError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn failed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConversionFailed {
            context: context.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoViableConstructor { dest, attempts } => {
                write!(f, "no viable constructor for '{dest}'")?;
                for a in attempts {
                    write!(f, "; {a}")?;
                }
                Ok(())
            }
            Self::NoParameterlessConstructor { dest } => {
                write!(f, "'{dest}' has no public parameterless constructor")
            }
            Self::UnableToMapProperty { dest, property } => {
                write!(f, "unable to map property '{property}' of '{dest}'")
            }
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::ConversionFailed { context, message } => {
                write!(f, "conversion failed at {context}: {message}")
            }
        }
    }
}

impl std::error::Error for MapError {}
