//! Ranking Order shared by every list-returning store operation:
//! score descending, then `created_at` ascending.

use std::cmp::Ordering;

use crate::models::Post;

pub fn ranking_order(a: &Post, b: &Post) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Sorts in place. Stable, so full ties keep their input order.
pub fn rank(posts: &mut [Post]) {
    posts.sort_by(ranking_order);
}
