use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::patch::Patch;

/// Usernames longer than this are rejected at registration.
pub const MAX_USERNAME_LEN: usize = 64;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A registered user as stored. `password_hash` never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub phone: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub city: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Registration input, with the password still in cleartext.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub phone: String,
    pub password: String,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.is_empty() || self.username.trim() != self.username {
            return Err(AppError::ValidationError(
                "Username must be non-empty and must not start or end with whitespace".into(),
            ));
        }
        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::ValidationError(format!(
                "Username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        require_non_blank("phone", &self.phone)?;
        if self.password.is_empty() {
            return Err(AppError::ValidationError("Password must not be empty".into()));
        }
        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::ValidationError(format!(
                "Password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        Ok(())
    }
}

/// DTO for inserting a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub phone: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub city: Option<String>,
}

/// Self-service profile changes. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub phone: Option<String>,
    pub name: Patch<String>,
    pub city: Patch<String>,
}

impl UserChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(phone) = &self.phone {
            require_non_blank("phone", phone)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// A real-estate listing ("shanyrak").
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

/// DTO for inserting a new listing. The owner comes from the caller's identity.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: Option<String>,
}

impl NewListing {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_blank("type", &self.kind)?;
        require_non_blank("address", &self.address)?;
        validate_price(self.price)?;
        validate_area(self.area)?;
        validate_rooms(self.rooms_count)
    }
}

/// Partial listing update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ListingChanges {
    pub kind: Option<String>,
    pub price: Option<i64>,
    pub address: Option<String>,
    pub area: Option<f64>,
    pub rooms_count: Option<i32>,
    pub description: Patch<String>,
}

impl ListingChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(kind) = &self.kind {
            require_non_blank("type", kind)?;
        }
        if let Some(address) = &self.address {
            require_non_blank("address", address)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(area) = self.area {
            validate_area(area)?;
        }
        if let Some(rooms_count) = self.rooms_count {
            validate_rooms(rooms_count)?;
        }
        Ok(())
    }

    /// Apply the changes to a listing in memory.
    pub fn apply_to(self, listing: &mut Listing) {
        if let Some(kind) = self.kind {
            listing.kind = kind;
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(address) = self.address {
            listing.address = address;
        }
        if let Some(area) = self.area {
            listing.area = area;
        }
        if let Some(rooms_count) = self.rooms_count {
            listing.rooms_count = rooms_count;
        }
        listing.description = self.description.apply(listing.description.take());
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// A comment left on a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub listing_id: Uuid,
}

pub fn validate_comment(content: &str) -> Result<(), AppError> {
    require_non_blank("content", content)
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{field} must not be blank")));
    }
    Ok(())
}

fn validate_price(price: i64) -> Result<(), AppError> {
    if price < 0 {
        return Err(AppError::ValidationError("price must not be negative".into()));
    }
    Ok(())
}

fn validate_area(area: f64) -> Result<(), AppError> {
    if !area.is_finite() || area <= 0.0 {
        return Err(AppError::ValidationError(
            "area must be a positive number".into(),
        ));
    }
    Ok(())
}

fn validate_rooms(rooms_count: i32) -> Result<(), AppError> {
    if rooms_count < 0 {
        return Err(AppError::ValidationError(
            "rooms_count must not be negative".into(),
        ));
    }
    Ok(())
}
