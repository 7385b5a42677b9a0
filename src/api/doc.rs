use utoipa::OpenApi;

pub const CUSTOMER_TAG: &str = "Customers";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grocery Store API",
        description = "Customer records for a grocery store",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = CUSTOMER_TAG, description = "Customer management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
