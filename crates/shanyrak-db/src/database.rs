use shanyrak_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::comment_repository::CommentRepository;
use crate::config::DatabaseConfig;
use crate::listing_repository::ListingRepository;
use crate::user_repository::UserRepository;

/// Owns the connection pool, runs migrations and hands out repositories.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        tracing::info!(max_connections = config.max_connections, "Database pool ready");
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn listing_repo(&self) -> ListingRepository {
        ListingRepository::new(self.pool.clone())
    }

    pub fn comment_repo(&self) -> CommentRepository {
        CommentRepository::new(self.pool.clone())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(crate::db_error)?;
        Ok(())
    }
}
