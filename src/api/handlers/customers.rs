//! Customer CRUD request handlers.
//!
//! All verbs share the `/api/customers` path and take their keys from the
//! query string, except `PUT` which reads a JSON body. A lookup that finds
//! nothing still answers with a body: `{"id": 0, "name": null}` alongside
//! 404 for reads and 400 for writes.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CUSTOMER_TAG;
use crate::api::dto::{CustomerQuery, CustomerRequest, CustomerResponse, ErrorResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// Creates customer routes, all on one path.
pub fn customer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        get_customers,
        create_customer,
        update_customer,
        delete_customer
    ))
}

fn require_id(id: Option<i32>) -> AppResult<i32> {
    match id {
        Some(id) if id > 0 => Ok(id),
        Some(_) => Err(AppError::Validation {
            field: "id".to_string(),
            reason: "Id must be a positive integer".to_string(),
        }),
        None => Err(AppError::Validation {
            field: "id".to_string(),
            reason: "Id is required".to_string(),
        }),
    }
}

fn require_name(name: Option<String>) -> AppResult<String> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(AppError::Validation {
            field: "name".to_string(),
            reason: "Name must not be blank".to_string(),
        }),
    }
}

/// 200 with the customer, or `miss_status` with the empty body.
fn respond(response: CustomerResponse, miss_status: StatusCode) -> Response {
    if response.is_empty() {
        (miss_status, Json(response)).into_response()
    } else {
        Json(response).into_response()
    }
}

/// GET /api/customers - Get one customer by id or name, or list them all
///
/// `id` wins when both keys are present.
#[utoipa::path(
    get,
    path = "/customers",
    tag = CUSTOMER_TAG,
    params(CustomerQuery),
    responses(
        (status = 200, description = "Customer found, or every customer when no key is given", body = CustomerResponse),
        (status = 400, description = "Non-positive id or blank name", body = ErrorResponse),
        (status = 404, description = "No customer matched", body = CustomerResponse),
        (status = 500, description = "Unexpected failure")
    )
)]
async fn get_customers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CustomerQuery>,
) -> AppResult<Response> {
    let request = match (query.id, query.name) {
        (Some(id), _) => CustomerRequest::by_id(require_id(Some(id))?),
        (None, Some(name)) => CustomerRequest::by_name(require_name(Some(name))?),
        (None, None) => {
            let customers = state.services.customers.list_all().await?;
            return Ok(Json(customers).into_response());
        }
    };

    let response = state.services.customers.get(&request).await?;
    Ok(respond(response, StatusCode::NOT_FOUND))
}

/// POST /api/customers?name= - Get or create a customer by name
///
/// Creating a name that already exists (ignoring case) returns the existing
/// customer.
#[utoipa::path(
    post,
    path = "/customers",
    tag = CUSTOMER_TAG,
    params(
        ("name" = String, Query, description = "Customer name")
    ),
    responses(
        (status = 200, description = "Customer created or already present", body = CustomerResponse),
        (status = 400, description = "Blank name, or the customer could not be stored"),
        (status = 500, description = "Unexpected failure")
    )
)]
async fn create_customer(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CustomerQuery>,
) -> AppResult<Response> {
    let name = require_name(query.name)?;
    let response = state.services.customers.create(&name).await?;
    Ok(respond(response, StatusCode::BAD_REQUEST))
}

/// PUT /api/customers - Rename an existing customer
#[utoipa::path(
    put,
    path = "/customers",
    tag = CUSTOMER_TAG,
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer renamed", body = CustomerResponse),
        (status = 400, description = "Invalid payload or no such customer"),
        (status = 500, description = "Unexpected failure")
    )
)]
async fn update_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CustomerRequest>,
) -> AppResult<Response> {
    let response = state.services.customers.update(request).await?;
    Ok(respond(response, StatusCode::BAD_REQUEST))
}

/// DELETE /api/customers?id= - Delete a customer
///
/// Not reversible. Deleted ids are never handed out again.
#[utoipa::path(
    delete,
    path = "/customers",
    tag = CUSTOMER_TAG,
    params(
        ("id" = i32, Query, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 400, description = "Non-positive id or no such customer"),
        (status = 500, description = "Unexpected failure")
    )
)]
async fn delete_customer(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CustomerQuery>,
) -> AppResult<StatusCode> {
    let id = require_id(query.id)?;
    if state.services.customers.delete(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::Validation {
            field: "id".to_string(),
            reason: format!("Customer {} could not be deleted", id),
        })
    }
}
