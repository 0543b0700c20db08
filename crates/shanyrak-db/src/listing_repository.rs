use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use shanyrak_core::error::AppError;
use shanyrak_core::models::{Listing, ListingChanges, NewListing};
use shanyrak_core::traits::ListingStore;

use crate::db_error;

/// Repository for listings ("shanyraks") in PostgreSQL.
#[derive(Clone)]
pub struct ListingRepository {
    pool: Pool<Postgres>,
}

impl ListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, owner_id: Uuid, listing: &NewListing) -> Result<Listing, AppError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            INSERT INTO shanyraks ("type", price, address, area, rooms_count, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, "type", price, address, area, rooms_count, description, user_id
            "#,
        )
        .bind(&listing.kind)
        .bind(listing.price)
        .bind(&listing.address)
        .bind(listing.area)
        .bind(listing.rooms_count)
        .bind(&listing.description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Listing>, AppError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT id, "type", price, address, area, rooms_count, description, user_id
            FROM shanyraks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    /// Partial update guarded by ownership. `None` means no listing with this
    /// id belongs to `owner_id`.
    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ListingChanges,
    ) -> Result<Option<Listing>, AppError> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            UPDATE shanyraks
            SET "type" = COALESCE($3, "type"),
                price = COALESCE($4, price),
                address = COALESCE($5, address),
                area = COALESCE($6, area),
                rooms_count = COALESCE($7, rooms_count),
                description = CASE WHEN $8 THEN $9 ELSE description END
            WHERE id = $1 AND user_id = $2
            RETURNING id, "type", price, address, area, rooms_count, description, user_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&changes.kind)
        .bind(changes.price)
        .bind(&changes.address)
        .bind(changes.area)
        .bind(changes.rooms_count)
        .bind(!changes.description.is_unchanged())
        .bind(changes.description.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    /// Delete a listing owned by `owner_id`. Comments go with it via
    /// `ON DELETE CASCADE`.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shanyraks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: Uuid,
    #[sqlx(rename = "type")]
    kind: String,
    price: i64,
    address: String,
    area: f64,
    rooms_count: i32,
    description: Option<String>,
    user_id: Uuid,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            id: row.id,
            kind: row.kind,
            price: row.price,
            address: row.address,
            area: row.area,
            rooms_count: row.rooms_count,
            description: row.description,
            owner_id: row.user_id,
        }
    }
}

// -- Trait implementation --

impl ListingStore for ListingRepository {
    async fn create(&self, owner_id: Uuid, listing: &NewListing) -> Result<Listing, AppError> {
        ListingRepository::create(self, owner_id, listing).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Listing>, AppError> {
        ListingRepository::get(self, id).await
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ListingChanges,
    ) -> Result<Option<Listing>, AppError> {
        ListingRepository::update(self, id, owner_id, changes).await
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        ListingRepository::delete(self, id, owner_id).await
    }
}
