use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{instrument, trace};

use crate::{
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
    AppState,
};

/// Extract user from JWT session cookie if present and valid
/// Returns:
/// - None: No JWT cookie present
/// - Some(Ok(user)): Valid JWT found and verified
/// - Some(Err(error)): JWT cookie present but invalid/malformed
#[instrument(skip(parts, config))]
fn try_jwt_session_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }))
        }
    };
    let cookie_name = &config.auth.native.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                // Try to verify the JWT session token
                match session::verify_session_token(value, config) {
                    Ok(user) => return Some(Ok(user)),
                    Err(_) => {
                        // Expired or stale cookies are expected; try any other cookie
                        continue;
                    }
                }
            }
        }
    }
    None
}

/// Extract user from a bearer JWT in the Authorization header if present
/// Returns:
/// - None: No Authorization header or not a Bearer token
/// - Some(Ok(user)): Valid session token
/// - Some(Err(error)): Bearer token present but invalid
#[instrument(skip(parts, config))]
fn try_bearer_token_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }))
        }
    };

    // Not a Bearer token, let other auth methods have a go
    let token = auth_str.strip_prefix("Bearer ")?;

    Some(session::verify_session_token(token, config))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        // Each method returns Option<Result<CurrentUser>>:
        // - None means the auth method is not applicable (no credentials present)
        // - Some(Ok(user)) means successful authentication
        // - Some(Err(error)) means auth credentials were present but invalid
        //
        // Strategy: try all methods and return the first successful one.
        // Only fail if all methods either weren't present or failed, so a
        // client holding a valid session cookie plus a stale bearer token
        // still authenticates.

        let mut any_auth_attempted = false;

        match try_bearer_token_auth(parts, &state.config) {
            Some(Ok(user)) => {
                trace!("Found bearer token authenticated user: {}", user.id);
                return Ok(user);
            }
            Some(Err(e)) => {
                trace!("Bearer token authentication failed: {:?}", e);
                any_auth_attempted = true;
            }
            None => {
                trace!("No bearer token authentication attempted");
            }
        }

        match try_jwt_session_auth(parts, &state.config) {
            Some(Ok(user)) => {
                trace!("Found JWT session authenticated user: {}", user.id);
                return Ok(user);
            }
            Some(Err(e)) => {
                trace!("JWT session authentication failed: {:?}", e);
                any_auth_attempted = true;
            }
            None => {
                trace!("No JWT session authentication attempted");
            }
        }

        if !any_auth_attempted {
            trace!("No authentication credentials found in request");
        }
        Err(Error::Unauthenticated { message: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::CurrentUser;
    use crate::config::Config;
    use axum::extract::FromRequestParts as _;
    use uuid::Uuid;

    fn test_state() -> AppState {
        let config = Config {
            secret_key: Some("test-secret-key-for-jwt".to_string()),
            ..Default::default()
        };
        // connect_lazy never opens a connection; these tests stay off the network
        let db = sqlx::PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        AppState::builder().db(db).config(config).build()
    }

    fn test_user() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "guest".to_string(),
            email: "guest@example.com".to_string(),
            is_admin: false,
            display_name: None,
        }
    }

    fn parts_with_header(name: &str, value: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/test")
            .header(name, value)
            .body(())
            .unwrap();
        let (parts, _body) = request.into_parts();
        parts
    }

    #[tokio::test]
    async fn bearer_token_authenticates() {
        let state = test_state();
        let user = test_user();
        let token = session::create_session_token(&user, &state.config).unwrap();

        let mut parts = parts_with_header("authorization", &format!("Bearer {token}"));
        let extracted = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(extracted.id, user.id);
        assert_eq!(extracted.email, user.email);
    }

    #[tokio::test]
    async fn session_cookie_authenticates() {
        let state = test_state();
        let user = test_user();
        let token = session::create_session_token(&user, &state.config).unwrap();
        let cookie_name = &state.config.auth.native.session.cookie_name;

        let mut parts = parts_with_header("cookie", &format!("{cookie_name}={token}"));
        let extracted = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(extracted.id, user.id);
    }

    #[tokio::test]
    async fn missing_credentials_are_unauthorized() {
        let state = test_state();
        let request = axum::http::Request::builder().uri("http://localhost/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        let error = result.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_unauthorized() {
        let state = test_state();

        let mut parts = parts_with_header("authorization", "Bearer not-a-jwt");
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;

        let error = result.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
