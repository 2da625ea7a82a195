//! Comment list logic. Ownership is checked before anything is removed.

use crate::error::{AppError, Result};
use crate::models::{Comment, Post};

pub fn append_comment(post: &mut Post, comment: Comment) {
    post.comments.push(comment);
}

/// Removes the comment `comment_id` on behalf of `user_id`.
///
/// Fails with `NotFound` if the comment is absent and `Forbidden` if
/// `user_id` did not write it; the post is untouched in both cases.
pub fn remove_comment(post: &mut Post, user_id: &str, comment_id: &str) -> Result<Comment> {
    let idx = post
        .comments
        .iter()
        .position(|c| c.id == comment_id)
        .ok_or_else(|| AppError::not_found("comment", comment_id))?;

    if post.comments[idx].author.id != user_id {
        return Err(AppError::Forbidden(format!(
            "user {user_id} is not the author of comment {comment_id}"
        )));
    }
    Ok(post.comments.remove(idx))
}
