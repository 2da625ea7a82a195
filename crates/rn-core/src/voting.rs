//! # Vote/Score logic
//!
//! Pure functions over a post's vote list. Votes replace rather than add up:
//! a user's previous entry is always removed before a new one is appended,
//! which is what keeps one vote per user without a separate index.
//!
//! Persisting the result is the caller's job.

use crate::error::{AppError, Result};
use crate::models::{Post, Vote, VoteValue};

/// `floor(100 * upvotes / votes)`, or 0 when there are no votes.
pub fn approval_percent(votes: &[Vote]) -> u32 {
    if votes.is_empty() {
        return 0;
    }
    let up = votes.iter().filter(|v| v.value == VoteValue::Up).count();
    (up * 100 / votes.len()) as u32
}

/// Records `value` for `user_id`, undoing any earlier vote by the same user.
pub fn apply_vote(post: &mut Post, user_id: &str, value: VoteValue) {
    if let Some(previous) = take_vote(post, user_id) {
        post.score -= previous.delta();
    }
    post.votes.push(Vote {
        user_id: user_id.to_string(),
        value,
    });
    post.score += value.delta();
    post.approval_percent = approval_percent(&post.votes);
}

/// Withdraws the vote of `user_id`. Fails with `InvalidVote` if there is none.
pub fn remove_vote(post: &mut Post, user_id: &str) -> Result<VoteValue> {
    let previous = take_vote(post, user_id).ok_or_else(|| {
        AppError::InvalidVote(format!("user {user_id} has no vote on post {}", post.id))
    })?;
    post.score -= previous.delta();
    post.approval_percent = approval_percent(&post.votes);
    Ok(previous)
}

fn take_vote(post: &mut Post, user_id: &str) -> Option<VoteValue> {
    let idx = post.votes.iter().position(|v| v.user_id == user_id)?;
    Some(post.votes.remove(idx).value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Category, NewPost, PostBody};

    fn fresh_post() -> Post {
        let author = Author {
            id: "author".into(),
            username: "alice".into(),
        };
        let new_post = NewPost {
            category: Category::Programming,
            title: "Ownership explained".into(),
            body: PostBody::Text {
                text: "borrow checker".into(),
            },
        };
        let mut post = Post::seeded(author, new_post, "2024-03-01T12:00:00Z".into());
        post.id = "p1".into();
        post
    }

    fn vote_sum(post: &Post) -> i64 {
        post.votes.iter().map(|v| v.value.delta()).sum()
    }

    #[test]
    fn approval_of_empty_list_is_zero() {
        assert_eq!(approval_percent(&[]), 0);
    }

    #[test]
    fn approval_floors() {
        let mut post = fresh_post();
        apply_vote(&mut post, "b", VoteValue::Down);
        apply_vote(&mut post, "c", VoteValue::Down);
        // 1 of 3
        assert_eq!(post.approval_percent, 33);
        assert_eq!(post.score, -1);
    }

    #[test]
    fn switching_vote_never_double_counts() {
        let mut post = fresh_post();
        apply_vote(&mut post, "bob", VoteValue::Up);
        apply_vote(&mut post, "bob", VoteValue::Down);
        apply_vote(&mut post, "bob", VoteValue::Down);

        assert_eq!(post.votes.iter().filter(|v| v.user_id == "bob").count(), 1);
        assert_eq!(post.vote_of("bob"), Some(VoteValue::Down));
        assert_eq!(post.score, 0);
        assert_eq!(post.score, vote_sum(&post));
        assert_eq!(post.approval_percent, 50);
    }

    #[test]
    fn unvote_restores_previous_state() {
        let mut post = fresh_post();
        apply_vote(&mut post, "carol", VoteValue::Down);
        let before = (post.score, post.approval_percent);

        apply_vote(&mut post, "dave", VoteValue::Up);
        remove_vote(&mut post, "dave").unwrap();

        assert_eq!((post.score, post.approval_percent), before);
        assert_eq!(post.score, vote_sum(&post));
    }

    #[test]
    fn unvote_without_vote_is_rejected() {
        let mut post = fresh_post();
        let err = remove_vote(&mut post, "stranger").unwrap_err();
        assert!(matches!(err, AppError::InvalidVote(_)));
        assert_eq!(post.score, 1);
        assert_eq!(post.votes.len(), 1);
    }

    #[test]
    fn removing_last_vote_yields_zero_approval() {
        let mut post = fresh_post();
        remove_vote(&mut post, "author").unwrap();
        assert!(post.votes.is_empty());
        assert_eq!(post.score, 0);
        assert_eq!(post.approval_percent, 0);
    }
}
