//! Bucket merging, priority sort and dedup-by-problem-id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::classify::classify_card;
use crate::types::{CardState, DisplayReviewProblem, ReviewCard};

/// Due cards grouped by FSRS state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueBuckets {
    pub new_cards: Vec<ReviewCard>,
    pub learning_cards: Vec<ReviewCard>,
    pub review_cards: Vec<ReviewCard>,
    pub relearning_cards: Vec<ReviewCard>,
}

impl QueueBuckets {
    /// Group a flat server list by state, preserving order within a bucket.
    pub fn from_cards(cards: impl IntoIterator<Item = ReviewCard>) -> Self {
        let mut buckets = Self::default();
        for card in cards {
            match card.state {
                CardState::New => buckets.new_cards.push(card),
                CardState::Learning => buckets.learning_cards.push(card),
                CardState::Review => buckets.review_cards.push(card),
                CardState::Relearning => buckets.relearning_cards.push(card),
            }
        }
        buckets
    }

    pub fn len(&self) -> usize {
        self.new_cards.len()
            + self.learning_cards.len()
            + self.review_cards.len()
            + self.relearning_cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cards in concatenation order: new, learning, review, relearning.
    pub fn iter(&self) -> impl Iterator<Item = &ReviewCard> {
        self.new_cards
            .iter()
            .chain(&self.learning_cards)
            .chain(&self.review_cards)
            .chain(&self.relearning_cards)
    }
}

/// Classify every card, sort by priority (highest first) and keep only the
/// first occurrence of each problem id.
///
/// The sort is stable, so cards with equal scores keep bucket order.
pub fn merge_buckets(buckets: &QueueBuckets, now: DateTime<Utc>) -> Vec<DisplayReviewProblem> {
    let mut classified: Vec<DisplayReviewProblem> =
        buckets.iter().map(|card| classify_card(card, now)).collect();

    classified.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));

    let mut seen = HashSet::new();
    classified.retain(|problem| seen.insert(problem.problem_id()));
    classified
}
