//! Auth Middleware
//!
//! `require_auth` runs `authenticate` on the access cookie and stores the
//! claims as an [`AuthContext`] request extension. Handlers take
//! `AuthContext` as an extractor; `require_admin` is layered inside it.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::session_claims::SessionClaims;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Claims of the authenticated caller
#[derive(Debug, Clone)]
pub struct AuthContext(pub SessionClaims);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::NoCredential)
    }
}

/// Middleware that requires a valid access token
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.access_cookie_name);

    let claims = AuthenticateUseCase::new(state.repo.clone(), state.authority.clone())
        .execute(token.as_deref())
        .await?;

    req.extensions_mut().insert(AuthContext(claims));

    Ok(next.run(req).await)
}

/// Middleware that requires the ADMIN role. Must run after [`require_auth`].
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .ok_or(AuthError::NoCredential)?;

    if !context.0.is_admin() {
        tracing::warn!(user_id = %context.0.user_id, "Non-admin hit admin route");
        return Err(AuthError::AdminRequired);
    }

    Ok(next.run(req).await)
}
