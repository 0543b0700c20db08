use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shanyrak_core::models::{
    Comment, Listing, ListingChanges, NewAccount, NewListing, User, UserChanges,
};
use shanyrak_core::patch::Patch;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub phone: String,
    pub password: String,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl From<RegisterRequest> for NewAccount {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            phone: req.phone,
            password: req.password,
            name: req.name,
            city: req.city,
        }
    }
}

/// Form fields posted to the login endpoint.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub phone: String,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            phone: user.phone,
            name: user.name,
            city: user.city,
        }
    }
}

/// Profile update. Absent fields are kept; `null` clears `name`/`city`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub city: Patch<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            phone: req.phone,
            name: req.name,
            city: req.city,
        }
    }
}

// ---------------------------------------------------------------------------
// Shanyraks
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateShanyrakRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: Option<String>,
}

impl From<CreateShanyrakRequest> for NewListing {
    fn from(req: CreateShanyrakRequest) -> Self {
        Self {
            kind: req.kind,
            price: req.price,
            address: req.address,
            area: req.area,
            rooms_count: req.rooms_count,
            description: req.description,
        }
    }
}

/// Listing update. Absent fields are kept; `null` clears `description`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateShanyrakRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub price: Option<i64>,
    pub address: Option<String>,
    pub area: Option<f64>,
    pub rooms_count: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
}

impl From<UpdateShanyrakRequest> for ListingChanges {
    fn from(req: UpdateShanyrakRequest) -> Self {
        Self {
            kind: req.kind,
            price: req.price,
            address: req.address,
            area: req.area,
            rooms_count: req.rooms_count,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ShanyrakResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: Option<String>,
    pub user_id: Uuid,
}

impl From<Listing> for ShanyrakResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            kind: listing.kind,
            price: listing.price,
            address: listing.address,
            area: listing.area,
            rooms_count: listing.rooms_count,
            description: listing.description,
            user_id: listing.owner_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            author_id: comment.author_id,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
}

// ---------------------------------------------------------------------------
// Acknowledgements
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub message: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
