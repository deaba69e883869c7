//! Memoized group generation.

use std::sync::Arc;

use rand::Rng;
use rustc_hash::FxHashMap;

use super::{generate_group_with, ParticleCategory, ParticleCount, ParticleGroup};
use crate::options::LayoutOptions;

/// Generates each `(count, category)` group once and hands out shared
/// handles afterwards.
///
/// Generation is randomized, so without the cache two requests for the same
/// group would disagree on every jittered position.
#[derive(Debug, Clone)]
pub struct GroupCache {
    layout: LayoutOptions,
    groups: FxHashMap<(usize, ParticleCategory), Arc<ParticleGroup>>,
}

impl GroupCache {
    /// Empty cache generating with the given layout.
    #[must_use]
    pub fn new(layout: LayoutOptions) -> Self {
        Self {
            layout,
            groups: FxHashMap::default(),
        }
    }

    /// Layout every cached group was generated with.
    #[must_use]
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Cached group, generating it with the thread RNG on first request.
    pub fn get_or_generate(
        &mut self,
        count: ParticleCount,
        category: ParticleCategory,
    ) -> Arc<ParticleGroup> {
        self.get_or_generate_with(count, category, &mut rand::rng())
    }

    /// Cached group, generating it from `rng` on first request.
    pub fn get_or_generate_with<R: Rng + ?Sized>(
        &mut self,
        count: ParticleCount,
        category: ParticleCategory,
        rng: &mut R,
    ) -> Arc<ParticleGroup> {
        let layout = &self.layout;
        Arc::clone(
            self.groups
                .entry((count.get(), category))
                .or_insert_with(|| {
                    log::debug!(
                        "generating {category:?} group of {} particles",
                        count.get()
                    );
                    Arc::new(generate_group_with(count, category, layout, rng))
                }),
        )
    }

    /// Number of distinct groups generated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether nothing has been generated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
