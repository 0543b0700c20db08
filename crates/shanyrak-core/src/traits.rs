use std::future::Future;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Comment, Listing, ListingChanges, NewListing, NewUser, User, UserChanges};

/// Persists and retrieves user accounts.
pub trait UserStore: Send + Sync + Clone {
    /// Insert a new user. Fails with [`AppError::Conflict`] if the username is taken.
    fn create(&self, user: &NewUser) -> impl Future<Output = Result<User, AppError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Apply profile changes. Returns `None` if no user has this id.
    fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;
}

/// Persists listings. Mutations are scoped to the owning user.
pub trait ListingStore: Send + Sync + Clone {
    fn create(
        &self,
        owner_id: Uuid,
        listing: &NewListing,
    ) -> impl Future<Output = Result<Listing, AppError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Option<Listing>, AppError>> + Send;

    /// Update a listing owned by `owner_id`. Returns `None` if no such listing exists
    /// for that owner.
    fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ListingChanges,
    ) -> impl Future<Output = Result<Option<Listing>, AppError>> + Send;

    /// Delete a listing owned by `owner_id`, together with its comments.
    /// Returns false if nothing was deleted.
    fn delete(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists comments. Mutations are scoped to the author.
pub trait CommentStore: Send + Sync + Clone {
    fn create(
        &self,
        listing_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> impl Future<Output = Result<Comment, AppError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Option<Comment>, AppError>> + Send;

    /// All comments on a listing, oldest first.
    fn list_for_listing(
        &self,
        listing_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Comment>, AppError>> + Send;

    /// Replace the content of a comment written by `author_id`.
    fn update(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> impl Future<Output = Result<Option<Comment>, AppError>> + Send;

    fn delete(
        &self,
        id: Uuid,
        author_id: Uuid,
    ) -> impl Future<Output = Result<bool, AppError>> + Send;
}
