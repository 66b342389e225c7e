use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use shared::{abstract_trait::DynJwtService, errors::HttpError};
use tracing::warn;

/// Token is the second whitespace-separated part of `Authorization`,
/// whatever the scheme word is.
fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.split_whitespace().nth(1))
        .map(str::to_owned)
}

pub async fn auth_middleware(
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let token = bearer_token(&req).ok_or_else(|| {
        HttpError::Unauthorized("You are not logged in, please provide token".to_string())
    })?;

    let claims = jwt.verify_token(&token).map_err(|err| {
        warn!("🚫 Rejected token on {}: {err}", req.uri().path());
        HttpError::Forbidden("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
