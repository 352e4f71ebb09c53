//! Authentication handlers.

use axum::{
    extract::State,
    http::header::AUTHORIZATION,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::AuthenticationRequest;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = AuthenticationRequest,
    responses(
        (status = 200, description = "Login successful; the token is also sent in the Authorization header",
            body = crate::services::AuthenticationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthenticationRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state.auth_service.login(payload).await?;

    Ok(([(AUTHORIZATION, response.token.clone())], Json(response)))
}
