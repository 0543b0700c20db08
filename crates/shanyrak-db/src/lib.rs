pub mod comment_repository;
pub mod config;
pub mod database;
pub mod listing_repository;
pub mod user_repository;

pub use comment_repository::CommentRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use listing_repository::ListingRepository;
pub use user_repository::UserRepository;

use shanyrak_core::AppError;

/// Translate a driver error into the application taxonomy.
///
/// Constraint violations become client errors; everything else is a
/// `DatabaseError` whose text stays server-side.
pub(crate) fn db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Conflict(match db.constraint() {
                Some(c) if c.contains("username") => "Username already taken".into(),
                Some(c) => format!("Duplicate value violates {c}"),
                None => "Duplicate value".into(),
            });
        }
        if db.is_foreign_key_violation() {
            return AppError::NotFound("Referenced record does not exist".into());
        }
        if db.is_check_violation() {
            return AppError::ValidationError(format!(
                "Value rejected by constraint {}",
                db.constraint().unwrap_or("check")
            ));
        }
    }
    AppError::DatabaseError(err.to_string())
}
