use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use shanyrak_core::error::AppError;
use shanyrak_core::models::{NewUser, User, UserChanges};
use shanyrak_core::traits::UserStore;

use crate::db_error;

/// Repository for user accounts in PostgreSQL.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user. The unique index on `username` turns races into `Conflict`.
    pub async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, phone, password, name, city)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, phone, password, name, city, registered_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.city)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, phone, password, name, city, registered_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    /// Apply profile changes in one statement; untouched columns keep their values.
    pub async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET phone = COALESCE($2, phone),
                name = CASE WHEN $3 THEN $4 ELSE name END,
                city = CASE WHEN $5 THEN $6 ELSE city END
            WHERE id = $1
            RETURNING id, username, phone, password, name, city, registered_at
            "#,
        )
        .bind(id)
        .bind(&changes.phone)
        .bind(!changes.name.is_unchanged())
        .bind(changes.name.value())
        .bind(!changes.city.is_unchanged())
        .bind(changes.city.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    phone: String,
    password: String,
    name: Option<String>,
    city: Option<String>,
    registered_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            phone: row.phone,
            password_hash: row.password,
            name: row.name,
            city: row.city,
            registered_at: row.registered_at,
        }
    }
}

// -- Trait implementation --

impl UserStore for UserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        UserRepository::create(self, user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        UserRepository::find_by_username(self, username).await
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, AppError> {
        UserRepository::update(self, id, changes).await
    }
}
