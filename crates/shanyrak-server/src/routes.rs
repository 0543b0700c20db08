use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::dto::{
    CommentListResponse, CommentRequest, CommentResponse, CreateShanyrakRequest, CreatedResponse,
    HealthResponse, LoginForm, MessageResponse, RegisterRequest, ShanyrakResponse, TokenResponse,
    UpdateShanyrakRequest, UpdateUserRequest, UserResponse,
};
use crate::error::ApiError;
use crate::extract::{FormBody, JsonBody, UuidPath};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Upper bound on request bodies; every payload here is a handful of short fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/auth/users/", post(register))
        .route("/auth/users/login", post(login))
        .route("/auth/users/me", get(get_me).patch(update_me))
        .route("/shanyraks/", post(create_shanyrak))
        .route(
            "/shanyraks/{id}",
            get(get_shanyrak)
                .patch(update_shanyrak)
                .delete(delete_shanyrak),
        )
        .route(
            "/shanyraks/{id}/comments",
            post(add_comment).get(list_comments),
        )
        .route(
            "/shanyraks/{id}/comments/{comment_id}",
            patch(update_comment).delete(delete_comment),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/auth/users/",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = CreatedResponse),
        (status = 400, description = "Invalid input or username taken", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.accounts().register(body.into()).await?;

    Ok(axum::Json(CreatedResponse {
        id: user.id,
        message: "User created successfully",
    }))
}

#[utoipa::path(
    post,
    path = "/auth/users/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Missing form fields", body = crate::dto::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .accounts()
        .authenticate(&form.username, &form.password)
        .await?;

    Ok(axum::Json(TokenResponse {
        access_token: token.token,
        token_type: "bearer",
        expires_at: token.expires_at,
    }))
}

#[utoipa::path(
    get,
    path = "/auth/users/me",
    responses(
        (status = 200, description = "Profile of the caller", body = UserResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 404, description = "User no longer exists", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    axum::Json(UserResponse::from(user))
}

#[utoipa::path(
    patch,
    path = "/auth/users/me",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 404, description = "User no longer exists", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.accounts().update_profile(user.id, body.into()).await?;

    Ok(axum::Json(MessageResponse {
        message: "User data updated successfully",
    }))
}

// ---------------------------------------------------------------------------
// Shanyraks
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/shanyraks/",
    request_body = CreateShanyrakRequest,
    responses(
        (status = 200, description = "Shanyrak created", body = CreatedResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "shanyraks"
)]
pub async fn create_shanyrak(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody<CreateShanyrakRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.listings().create(user.id, body.into()).await?;

    Ok(axum::Json(CreatedResponse {
        id: listing.id,
        message: "Shanyrak created successfully",
    }))
}

#[utoipa::path(
    get,
    path = "/shanyraks/{id}",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID")
    ),
    responses(
        (status = 200, description = "Shanyrak details", body = ShanyrakResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "shanyraks"
)]
pub async fn get_shanyrak(
    State(state): State<Arc<AppState>>,
    UuidPath(id): UuidPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.listings().get(id).await?;
    Ok(axum::Json(ShanyrakResponse::from(listing)))
}

#[utoipa::path(
    patch,
    path = "/shanyraks/{id}",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID")
    ),
    request_body = UpdateShanyrakRequest,
    responses(
        (status = 200, description = "Shanyrak updated", body = MessageResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Not authenticated or not the owner", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "shanyraks"
)]
pub async fn update_shanyrak(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    UuidPath(id): UuidPath<Uuid>,
    JsonBody(body): JsonBody<UpdateShanyrakRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.listings().update(id, user.id, body.into()).await?;

    Ok(axum::Json(MessageResponse {
        message: "Shanyrak updated successfully",
    }))
}

#[utoipa::path(
    delete,
    path = "/shanyraks/{id}",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID")
    ),
    responses(
        (status = 200, description = "Shanyrak and its comments deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated or not the owner", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "shanyraks"
)]
pub async fn delete_shanyrak(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    UuidPath(id): UuidPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.listings().delete(id, user.id).await?;

    Ok(axum::Json(MessageResponse {
        message: "Shanyrak deleted successfully",
    }))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/shanyraks/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment added", body = CreatedResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 404, description = "Shanyrak not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "comments"
)]
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    UuidPath(id): UuidPath<Uuid>,
    JsonBody(body): JsonBody<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state.comments().add(id, user.id, &body.content).await?;

    Ok(axum::Json(CreatedResponse {
        id: comment.id,
        message: "Comment added successfully",
    }))
}

#[utoipa::path(
    get,
    path = "/shanyraks/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID")
    ),
    responses(
        (status = 200, description = "Comments, oldest first", body = CommentListResponse),
        (status = 404, description = "Shanyrak not found", body = crate::dto::ErrorResponse),
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    UuidPath(id): UuidPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = state.comments().list(id).await?;

    Ok(axum::Json(CommentListResponse {
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

#[utoipa::path(
    patch,
    path = "/shanyraks/{id}/comments/{comment_id}",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID"),
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = MessageResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Not authenticated or not the author", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "comments"
)]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    UuidPath((id, comment_id)): UuidPath<(Uuid, Uuid)>,
    JsonBody(body): JsonBody<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .comments()
        .update(id, comment_id, user.id, &body.content)
        .await?;

    Ok(axum::Json(MessageResponse {
        message: "Comment updated successfully",
    }))
}

#[utoipa::path(
    delete,
    path = "/shanyraks/{id}/comments/{comment_id}",
    params(
        ("id" = Uuid, Path, description = "Shanyrak ID"),
        ("comment_id" = Uuid, Path, description = "Comment ID"),
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated or not the author", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    UuidPath((id, comment_id)): UuidPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    state.comments().delete(id, comment_id, user.id).await?;

    Ok(axum::Json(MessageResponse {
        message: "Comment deleted successfully",
    }))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let healthy = match state.db.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            false
        }
    };

    let (status, response) = if healthy {
        (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: "ok",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "unhealthy",
                database: "error",
            },
        )
    };

    (status, axum::Json(response))
}
