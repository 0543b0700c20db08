use shanyrak_core::{AccountService, CommentService, Credentials, ListingService};
use shanyrak_db::{CommentRepository, Database, ListingRepository, UserRepository};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(db: Database, credentials: Credentials) -> Self {
        Self { db, credentials }
    }

    pub fn accounts(&self) -> AccountService<UserRepository> {
        AccountService::new(self.db.user_repo(), self.credentials.clone())
    }

    pub fn listings(&self) -> ListingService<ListingRepository> {
        ListingService::new(self.db.listing_repo())
    }

    pub fn comments(&self) -> CommentService<CommentRepository, ListingRepository> {
        CommentService::new(self.db.comment_repo(), self.db.listing_repo())
    }
}
