// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tie-breaking among viable constructor candidates.

use crate::plan::ConstructorPlan;

/// Picks one plan out of several fully resolved candidates.
pub trait Prioritiser: Send + Sync {
    /// Select the winning candidate. `candidates` is never empty;
    /// returns an index into it.
    fn pick(&self, candidates: &[ConstructorPlan]) -> usize;
}

/// Default rule: the candidate whose accessors include the most
/// non-default-sourced parameters wins; ties break by constructor
/// declaration order (first wins).
///
/// Deterministic rather than semantically "best": a later constructor
/// that happens to be richer by the same count still loses.
#[derive(Debug, Default, Clone, Copy)]
pub struct MostResolvedParams;

impl Prioritiser for MostResolvedParams {
    fn pick(&self, candidates: &[ConstructorPlan]) -> usize {
        let mut best = 0;
        let mut best_score = candidates[0].non_default_count();
        for (i, c) in candidates.iter().enumerate().skip(1) {
            let score = c.non_default_count();
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }
}
