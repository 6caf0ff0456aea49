//! Recommended problem ids accumulated across pages.

use std::collections::HashSet;

/// Append-only set of problem ids that have been recommended this session.
///
/// Only [`RecommendedIds::reset`] removes ids; call it at a session boundary.
#[derive(Debug, Clone, Default)]
pub struct RecommendedIds {
    ids: HashSet<i64>,
}

impl RecommendedIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, problem_id: i64) -> bool {
        self.ids.insert(problem_id)
    }

    pub fn extend(&mut self, problem_ids: impl IntoIterator<Item = i64>) {
        self.ids.extend(problem_ids);
    }

    pub fn contains(&self, problem_id: i64) -> bool {
        self.ids.contains(&problem_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn reset(&mut self) {
        self.ids.clear();
    }
}
