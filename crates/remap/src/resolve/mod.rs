// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member-access resolution strategies.
//!
//! A [`MemberResolver`] either produces a reusable [`MemberAccessor`]
//! for `(source type, member name, desired type)` or declines. A
//! [`ResolverChain`] tries an ordered list of strategies and takes the
//! first success. Newly learned strategies are **prepended**, so more
//! specific, recently registered mappings outrank generic ones matching
//! the same member. That ordering is what makes nested and recursive
//! types resolve against the converter learned for them rather than a
//! best-effort generic strategy.

mod accessor;
mod defaults;
mod direct;
mod enums;
mod learned;

pub use accessor::{MemberAccessor, ReadFn};
pub use defaults::default_value_accessor;
pub use direct::{assignable, coerce, DirectAssignResolver};
pub use enums::EnumTranslateResolver;
pub use learned::{ObjectConverterResolver, SequenceConverterResolver};

use crate::error::{MapError, Result};
use crate::types::TypeDescriptor;
use std::sync::Arc;

/// One member-access strategy.
///
/// External adapters (third-party mapping engines) implement this same
/// trait and sit at the end of the chain; such an adapter must verify
/// feasibility itself before returning a match.
pub trait MemberResolver: Send + Sync {
    /// Strategy name, for diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Try to produce an accessor reading `member` off `source` as a
    /// value assignable to `desired`. `Ok(None)` means this strategy
    /// declines and the next one is tried.
    fn try_resolve(
        &self,
        source: &Arc<TypeDescriptor>,
        member: &str,
        desired: &Arc<TypeDescriptor>,
    ) -> Result<Option<MemberAccessor>>;
}

/// Ordered first-match-wins combinator over resolvers.
///
/// The chain is an immutable value: extension returns a new chain and
/// never mutates the old one, so plans compiled against an older chain
/// stay valid.
#[derive(Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn MemberResolver>>,
}

impl ResolverChain {
    /// Create a chain from an ordered resolver list.
    pub fn new(resolvers: Vec<Arc<dyn MemberResolver>>) -> Self {
        Self { resolvers }
    }

    /// New chain with `resolver` in front of everything already present.
    pub fn prepended(&self, resolver: Arc<dyn MemberResolver>) -> Self {
        let mut resolvers = Vec::with_capacity(self.resolvers.len() + 1);
        resolvers.push(resolver);
        resolvers.extend(self.resolvers.iter().cloned());
        Self { resolvers }
    }

    /// New chain with `resolver` behind everything already present.
    pub fn appended(&self, resolver: Arc<dyn MemberResolver>) -> Self {
        let mut resolvers = self.resolvers.clone();
        resolvers.push(resolver);
        Self { resolvers }
    }

    /// Number of strategies in the chain.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// True when the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolve `member` by trying each strategy in order.
    pub fn try_resolve(
        &self,
        source: &Arc<TypeDescriptor>,
        member: &str,
        desired: &Arc<TypeDescriptor>,
    ) -> Result<Option<MemberAccessor>> {
        if member.trim().is_empty() {
            return Err(MapError::invalid("member name is empty or blank"));
        }
        for resolver in &self.resolvers {
            if let Some(accessor) = resolver.try_resolve(source, member, desired)? {
                log::trace!(
                    "[resolve] {} resolved '{}' ({} -> {})",
                    resolver.name(),
                    member,
                    source.name,
                    desired.name
                );
                return Ok(Some(accessor));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.resolvers.iter().map(|r| r.name()))
            .finish()
    }
}
