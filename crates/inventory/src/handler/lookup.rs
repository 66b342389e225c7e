use crate::{
    middleware::{jwt::auth_middleware, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::DynLookupService,
    domain::{requests::CreateLookupRequest, responses::LookupResponse},
    errors::{ErrorResponse, HttpError},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

async fn list(
    service: DynLookupService,
) -> Result<(StatusCode, Json<Vec<LookupResponse>>), HttpError> {
    let rows = service.find_all().await?;
    Ok((StatusCode::OK, Json(rows)))
}

async fn create(
    service: DynLookupService,
    body: CreateLookupRequest,
) -> Result<(StatusCode, Json<LookupResponse>), HttpError> {
    let row = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Category",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories", body = Vec<LookupResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynLookupService>,
) -> Result<impl IntoResponse, HttpError> {
    list(service).await
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Category",
    security(("bearer_auth" = [])),
    request_body = CreateLookupRequest,
    responses(
        (status = 201, description = "Category created", body = LookupResponse),
        (status = 400, description = "Missing or duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_category(
    Extension(service): Extension<DynLookupService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateLookupRequest>,
) -> Result<impl IntoResponse, HttpError> {
    create(service, body).await
}

#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "Location",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All locations", body = Vec<LookupResponse>),
        (status = 401, description = "Missing token", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn get_locations(
    Extension(service): Extension<DynLookupService>,
) -> Result<impl IntoResponse, HttpError> {
    list(service).await
}

#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "Location",
    security(("bearer_auth" = [])),
    request_body = CreateLookupRequest,
    responses(
        (status = 201, description = "Location created", body = LookupResponse),
        (status = 400, description = "Missing or duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_location(
    Extension(service): Extension<DynLookupService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateLookupRequest>,
) -> Result<impl IntoResponse, HttpError> {
    create(service, body).await
}

pub fn category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/categories", get(get_categories).post(create_category))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.category_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}

pub fn location_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/locations", get(get_locations).post(create_location))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.location_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
