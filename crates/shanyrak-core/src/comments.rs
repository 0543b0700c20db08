use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Comment, validate_comment};
use crate::traits::{CommentStore, ListingStore};

/// Comments on listings. Any authenticated user may comment; only the author
/// may edit or delete.
#[derive(Clone)]
pub struct CommentService<C: CommentStore, L: ListingStore> {
    comments: C,
    listings: L,
}

impl<C: CommentStore, L: ListingStore> CommentService<C, L> {
    pub fn new(comments: C, listings: L) -> Self {
        Self { comments, listings }
    }

    pub async fn add(
        &self,
        listing_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        validate_comment(content)?;
        self.require_listing(listing_id).await?;

        let comment = self.comments.create(listing_id, author_id, content).await?;
        tracing::info!(comment_id = %comment.id, %listing_id, "Comment added");
        Ok(comment)
    }

    /// Comments on a listing, oldest first.
    pub async fn list(&self, listing_id: Uuid) -> Result<Vec<Comment>, AppError> {
        self.require_listing(listing_id).await?;
        self.comments.list_for_listing(listing_id).await
    }

    pub async fn update(
        &self,
        listing_id: Uuid,
        comment_id: Uuid,
        caller_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        self.check_author(listing_id, comment_id, caller_id).await?;
        validate_comment(content)?;

        let comment = self
            .comments
            .update(comment_id, caller_id, content)
            .await?
            .ok_or_else(|| comment_not_found(comment_id))?;

        tracing::info!(%comment_id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete(
        &self,
        listing_id: Uuid,
        comment_id: Uuid,
        caller_id: Uuid,
    ) -> Result<(), AppError> {
        self.check_author(listing_id, comment_id, caller_id).await?;

        if !self.comments.delete(comment_id, caller_id).await? {
            return Err(comment_not_found(comment_id));
        }

        tracing::info!(%comment_id, "Comment deleted");
        Ok(())
    }

    async fn require_listing(&self, listing_id: Uuid) -> Result<(), AppError> {
        match self.listings.get(listing_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Shanyrak not found: {listing_id}"
            ))),
        }
    }

    /// The comment must exist under `listing_id` and be written by `caller_id`.
    async fn check_author(
        &self,
        listing_id: Uuid,
        comment_id: Uuid,
        caller_id: Uuid,
    ) -> Result<Comment, AppError> {
        let comment = self
            .comments
            .get(comment_id)
            .await?
            .filter(|c| c.listing_id == listing_id)
            .ok_or_else(|| comment_not_found(comment_id))?;

        if comment.author_id != caller_id {
            tracing::warn!(%comment_id, %caller_id, "Caller is not the comment author");
            return Err(AppError::Unauthorized(
                "Only the author can modify this comment".into(),
            ));
        }
        Ok(comment)
    }
}

fn comment_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Comment not found: {id}"))
}
