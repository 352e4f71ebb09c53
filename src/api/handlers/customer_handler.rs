//! Customer handlers.

use axum::{
    extract::{Extension, State},
    http::{header::AUTHORIZATION, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use crate::api::extractors::{ApiPath, ValidatedJson};
use crate::api::middleware::CurrentCustomer;
use crate::api::AppState;
use crate::domain::{CustomerDto, CustomerRegistrationRequest, CustomerUpdateRequest};
use crate::errors::AppResult;

/// Registration is open to anonymous callers.
pub fn public_customer_routes() -> Router<AppState> {
    Router::new().route("/", post(register_customer))
}

/// Routes that require a bearer token.
pub fn customer_routes() -> Router<AppState> {
    Router::new().route("/", get(get_customers)).route(
        "/:customer_id",
        get(get_customer)
            .put(update_customer)
            .delete(delete_customer),
    )
}

/// Register a new customer
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CustomerRegistrationRequest,
    responses(
        (status = 200, description = "Customer registered; JWT returned in the Authorization header"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CustomerRegistrationRequest>,
) -> AppResult<impl IntoResponse> {
    let email = payload.email.clone();
    state.customer_service.add_customer(payload).await?;

    let token = state
        .auth_service
        .issue_token(&email, &[crate::config::ROLE_USER.to_string()])?;

    Ok((StatusCode::OK, [(AUTHORIZATION, token)]))
}

/// List all customers
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "All customers", body = Vec<CustomerDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_customers(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
) -> AppResult<Json<Vec<CustomerDto>>> {
    tracing::debug!(requested_by = current.id, "Listing customers");
    let customers = state.customer_service.get_all_customers().await?;
    Ok(Json(customers))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/api/v1/customers/{customer_id}",
    tag = "Customers",
    params(("customer_id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = CustomerDto),
        (status = 400, description = "Customer ID is not a number"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i32>,
) -> AppResult<Json<CustomerDto>> {
    let customer = state.customer_service.get_customer_by_id(customer_id).await?;
    Ok(Json(customer))
}

/// Update customer
#[utoipa::path(
    put,
    path = "/api/v1/customers/{customer_id}",
    tag = "Customers",
    params(("customer_id" = i32, Path, description = "Customer ID")),
    request_body = CustomerUpdateRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "There were no changes")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_customer(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CustomerUpdateRequest>,
) -> AppResult<Json<CustomerDto>> {
    let customer = state
        .customer_service
        .update_customer(payload, customer_id)
        .await?;
    Ok(Json(customer))
}

/// Delete customer
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{customer_id}",
    tag = "Customers",
    params(("customer_id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Customer ID is not a number"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
    ApiPath(customer_id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.customer_service.delete_customer(customer_id).await?;
    tracing::debug!(customer_id, requested_by = %current.email, "Delete handled");
    Ok(StatusCode::NO_CONTENT)
}
