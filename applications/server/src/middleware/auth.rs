/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use lyrics_core::RequestContext;
use std::sync::Arc;

/// Caller identity for the current request.
///
/// Anonymous unless the request carried a valid access token.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub RequestContext);

impl Caller {
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

/// Middleware that resolves the optional bearer token into a `Caller`.
///
/// A missing `Authorization` header is anonymous access. A header that is
/// present but not a valid access token is rejected with 401.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let context = match request.headers().get(AUTHORIZATION) {
        None => RequestContext::anonymous(),
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(|h| h.strip_prefix("Bearer "))
                .ok_or_else(|| ServerError::Auth("Malformed Authorization header".to_string()))?;

            let user_id = auth_service.verify_access_token(token).map_err(|e| {
                tracing::warn!("Token verification failed: {}", e);
                ServerError::Auth("Invalid token".to_string())
            })?;

            RequestContext::authenticated(user_id)
        }
    };

    request.extensions_mut().insert(Caller(context));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so Caller can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}
