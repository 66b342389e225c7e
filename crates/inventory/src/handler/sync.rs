use crate::{middleware::jwt::auth_middleware, state::AppState};
use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use serde_json::Value;
use shared::{
    domain::{requests::SyncProductRequest, responses::SyncResponse},
    errors::{ErrorResponse, HttpError},
    service::ProductService,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/sync",
    tag = "Sync",
    security(("bearer_auth" = [])),
    request_body = Vec<SyncProductRequest>,
    responses(
        (status = 200, description = "Products table replaced", body = SyncResponse),
        (status = 400, description = "Body is not an array", body = ErrorResponse),
        (status = 500, description = "Batch rolled back, per-record errors in details", body = ErrorResponse)
    )
)]
pub async fn sync_products(
    Extension(service): Extension<ProductService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Json(payload) = payload.map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

    let Value::Array(records) = payload else {
        return Err(HttpError::BadRequest(
            "Data must be an array of products".to_string(),
        ));
    };

    let response = service.command.sync_products(records).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn sync_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/sync", post(sync_products))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.product_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
