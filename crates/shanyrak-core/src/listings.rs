use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Listing, ListingChanges, NewListing};
use crate::traits::ListingStore;

/// Listing CRUD. Reads are public; writes require the caller to own the listing.
#[derive(Clone)]
pub struct ListingService<L: ListingStore> {
    listings: L,
}

impl<L: ListingStore> ListingService<L> {
    pub fn new(listings: L) -> Self {
        Self { listings }
    }

    pub async fn create(&self, owner_id: Uuid, listing: NewListing) -> Result<Listing, AppError> {
        listing.validate()?;

        let listing = self.listings.create(owner_id, &listing).await?;
        tracing::info!(listing_id = %listing.id, %owner_id, "Shanyrak created");
        Ok(listing)
    }

    pub async fn get(&self, id: Uuid) -> Result<Listing, AppError> {
        self.listings.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Apply a partial update. Omitted fields keep their stored values.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        changes: ListingChanges,
    ) -> Result<Listing, AppError> {
        self.check_owner(id, caller_id).await?;
        changes.validate()?;

        let listing = self
            .listings
            .update(id, caller_id, &changes)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(listing_id = %id, "Shanyrak updated");
        Ok(listing)
    }

    /// Delete a listing and its comments.
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
        self.check_owner(id, caller_id).await?;

        if !self.listings.delete(id, caller_id).await? {
            return Err(not_found(id));
        }

        tracing::info!(listing_id = %id, "Shanyrak deleted");
        Ok(())
    }

    async fn check_owner(&self, id: Uuid, caller_id: Uuid) -> Result<Listing, AppError> {
        let listing = self.get(id).await?;
        if listing.owner_id != caller_id {
            tracing::warn!(listing_id = %id, %caller_id, "Caller does not own shanyrak");
            return Err(AppError::Unauthorized(
                "Only the owner can modify this shanyrak".into(),
            ));
        }
        Ok(listing)
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Shanyrak not found: {id}"))
}
