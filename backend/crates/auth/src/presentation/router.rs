//! Auth Routers
//!
//! `auth_router` is nested at `/api/auth`, `admin_router` at `/api/admin`.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_auth};

/// Account routes. `/logout-all` and `/me` require an access token.
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/logout-all", post(handlers::logout_all::<R>))
        .route("/me", get(handlers::me::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/verify-email", post(handlers::verify_email::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/forgot-password", post(handlers::forgot_password::<R>))
        .route("/reset-password", post(handlers::reset_password::<R>))
        .merge(protected)
        .with_state(state)
}

/// Admin routes: authenticate, then require the ADMIN role.
pub fn admin_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/users/{user_id}/revoke-sessions",
            post(handlers::admin_revoke_sessions::<R>),
        )
        .route("/users/{user_id}", delete(handlers::admin_delete_user::<R>))
        .route("/users/{user_id}/role", put(handlers::admin_change_role::<R>))
        .route(
            "/users/{user_id}/password",
            post(handlers::admin_reset_password::<R>),
        )
        // Layers run bottom-up: require_auth first, then require_admin
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ))
        .with_state(state)
}
