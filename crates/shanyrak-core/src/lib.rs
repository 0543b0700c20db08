pub mod accounts;
pub mod auth;
pub mod comments;
pub mod error;
pub mod listings;
pub mod models;
pub mod patch;
pub mod traits;


pub use accounts::AccountService;
pub use auth::{AccessToken, AuthConfig, Credentials};
pub use comments::CommentService;
pub use error::AppError;
pub use listings::ListingService;
pub use models::{Comment, Listing, ListingChanges, NewAccount, NewListing, User, UserChanges};
pub use patch::Patch;
pub use traits::{CommentStore, ListingStore, UserStore};
