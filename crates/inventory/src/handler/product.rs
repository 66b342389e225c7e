use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, rejection::PathRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{ChangesResponse, CreatedResponse, ProductResponse},
    },
    errors::{ErrorResponse, HttpError},
    service::ProductService,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

fn product_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, HttpError> {
    let Path(id) = id.map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
    Ok(id)
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All products with category and location names", body = Vec<ProductResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<ProductService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.query.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreatedResponse),
        (status = 400, description = "Missing name or quantity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<ProductService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.command.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Rows changed, 0 when the id does not exist", body = ChangesResponse),
        (status = 400, description = "Non-numeric id, missing name or quantity", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_product(
    Extension(service): Extension<ProductService>,
    id: Result<Path<i64>, PathRejection>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = product_id(id)?;

    let response = service.command.update_product(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Rows deleted, 0 when the id does not exist", body = ChangesResponse),
        (status = 400, description = "Non-numeric id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    Extension(service): Extension<ProductService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let id = product_id(id)?;
    let response = service.command.delete_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(get_products).post(create_product))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.product_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
