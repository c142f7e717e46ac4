use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::MovieRecord;

/// Upper bound on the size of a recommendation set
pub const MAX_RECOMMENDATIONS: usize = 12;

/// Final list shown to a user or group: unique by id, at most 12 entries
pub type RecommendationSet = Vec<MovieRecord>;

/// Dedupes candidates by id (first occurrence wins), shuffles, then caps
///
/// The shuffle is a Fisher-Yates pass driven by `rng`, so every permutation
/// of the deduplicated pool is equally likely.
pub fn build_recommendation_set<R: Rng + ?Sized>(
    candidates: Vec<MovieRecord>,
    rng: &mut R,
) -> RecommendationSet {
    let pool_size = candidates.len();
    let mut seen = HashSet::with_capacity(pool_size);
    let mut unique: Vec<MovieRecord> = candidates
        .into_iter()
        .filter(|movie| seen.insert(movie.id.clone()))
        .collect();

    unique.shuffle(rng);
    unique.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        pool_size,
        distinct = seen.len(),
        selected = unique.len(),
        "Built recommendation set"
    );

    unique
}
