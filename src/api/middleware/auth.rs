//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_USER};
use crate::errors::AppError;
use crate::services::Claims;

/// Authenticated customer resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentCustomer {
    pub id: i32,
    pub email: String,
    pub roles: Vec<String>,
}

/// JWT authentication middleware.
///
/// Verifies the bearer token, loads the customer named by its subject and
/// injects a [`CurrentCustomer`] into the request extensions. Tokens for
/// customers that no longer exist are rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;
    require_role(&claims, ROLE_USER)?;

    let customer = match state
        .auth_service
        .load_customer_by_username(&claims.sub)
        .await
    {
        Ok(customer) => customer,
        Err(AppError::UsernameNotFound(msg)) => {
            tracing::debug!("Rejecting token: {}", msg);
            return Err(AppError::Unauthorized);
        }
        Err(e) => return Err(e),
    };

    request.extensions_mut().insert(CurrentCustomer {
        id: customer.id,
        email: customer.email,
        roles: claims.scopes,
    });

    Ok(next.run(request).await)
}

/// Require `role` among the token's scopes, returns Forbidden otherwise.
pub fn require_role(claims: &Claims, role: &str) -> Result<(), AppError> {
    if claims.scopes.iter().any(|s| s == role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
