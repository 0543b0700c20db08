use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shanyrak API",
        version = "0.1.0",
        description = "Real-estate listings with user accounts and comments."
    ),
    paths(
        crate::routes::register,
        crate::routes::login,
        crate::routes::get_me,
        crate::routes::update_me,
        crate::routes::create_shanyrak,
        crate::routes::get_shanyrak,
        crate::routes::update_shanyrak,
        crate::routes::delete_shanyrak,
        crate::routes::add_comment,
        crate::routes::list_comments,
        crate::routes::update_comment,
        crate::routes::delete_comment,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::RegisterRequest,
        crate::dto::LoginForm,
        crate::dto::TokenResponse,
        crate::dto::UserResponse,
        crate::dto::UpdateUserRequest,
        crate::dto::CreateShanyrakRequest,
        crate::dto::UpdateShanyrakRequest,
        crate::dto::ShanyrakResponse,
        crate::dto::CommentRequest,
        crate::dto::CommentResponse,
        crate::dto::CommentListResponse,
        crate::dto::CreatedResponse,
        crate::dto::MessageResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "users", description = "Registration, login and profile"),
        (name = "shanyraks", description = "Listings"),
        (name = "comments", description = "Comments on listings"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected paths.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token from POST /auth/users/login. \
                             A raw `token` header is also accepted.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
