/**
 * Authentication Middleware
 *
 * Every request passes through [`auth_middleware`]. Paths on the exempt list go
 * straight to their handler. Everything else must carry an `Authorization:
 * <scheme> <token>` header whose token verifies; the subject is then attached
 * to the request extensions as an [`AuthenticatedUser`] and read back by
 * handlers through the [`AuthUser`] extractor.
 *
 * Whatever the outcome, the response leaves with `Content-Type:
 * application/json`.
 */

use std::collections::HashSet;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
        HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::backend::auth::sessions::{AuthError, TokenVerifier};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Paths that bypass authentication when no override is configured
pub const DEFAULT_EXEMPT_PATHS: [&str; 3] = ["/user/create", "/user/login", "/"];

/// Exact-match allow-list of request paths that skip authentication
///
/// Matching is plain string equality: `/user/login/` and `/user/login/x` are
/// not exempt just because `/user/login` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExemptPaths {
    paths: HashSet<String>,
}

impl ExemptPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list, ignoring blank entries
    pub fn parse_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty()),
        )
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ExemptPaths {
    fn default() -> Self {
        Self::new(DEFAULT_EXEMPT_PATHS)
    }
}

/// Identity attached to a request that passed authentication
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Token subject (the account email)
    pub subject: String,
}

/// Terminal state of the per-request authentication check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Path is on the allow-list; no check performed
    Exempt,
    /// Token verified
    Authenticated(AuthenticatedUser),
    /// Header missing or malformed, or token rejected
    Rejected(AuthError),
}

/// Decide the outcome for one request
///
/// Missing, empty and non-UTF-8 headers are all [`AuthError::MalformedHeader`].
pub fn authenticate(
    exempt_paths: &ExemptPaths,
    verifier: &TokenVerifier,
    path: &str,
    authorization: Option<&HeaderValue>,
) -> AuthOutcome {
    if exempt_paths.contains(path) {
        return AuthOutcome::Exempt;
    }

    let header_value = match authorization.and_then(|h| h.to_str().ok()) {
        Some(value) if !value.is_empty() => value,
        _ => return AuthOutcome::Rejected(AuthError::MalformedHeader),
    };

    match verifier.verify_credential(header_value) {
        Ok(subject) => AuthOutcome::Authenticated(AuthenticatedUser { subject }),
        Err(e) => AuthOutcome::Rejected(e),
    }
}

/// Authentication middleware
///
/// Install with `axum::middleware::from_fn_with_state` so it wraps every route
/// and the fallback.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = authenticate(
        &app_state.exempt_paths,
        &app_state.verifier,
        request.uri().path(),
        request.headers().get(AUTHORIZATION),
    );

    let mut response = match outcome {
        AuthOutcome::Exempt => next.run(request).await,
        AuthOutcome::Authenticated(user) => {
            tracing::debug!(subject = %user.subject, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        AuthOutcome::Rejected(err) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected unauthenticated request: {}",
                err
            );
            BackendError::Unauthorized(err).into_response()
        }
    };

    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Axum extractor for the authenticated user
///
/// Only succeeds behind [`auth_middleware`] on a non-exempt path.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthorized(AuthError::MalformedHeader)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::{SigningKey, TokenIssuer};
    use chrono::Duration;
    use std::sync::Arc;

    fn issuer_and_verifier() -> (TokenIssuer, TokenVerifier) {
        let key = Arc::new(SigningKey::from_secret(b"middleware-test-secret-0123456789"));
        (TokenIssuer::new(key.clone()), TokenVerifier::new(key))
    }

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn test_default_exempt_paths() {
        let exempt = ExemptPaths::default();

        assert_eq!(exempt.len(), 3);
        assert!(exempt.contains("/user/create"));
        assert!(exempt.contains("/user/login"));
        assert!(exempt.contains("/"));
        assert!(!exempt.contains("/user/me"));
    }

    #[test]
    fn test_exempt_matching_is_exact() {
        let exempt = ExemptPaths::default();

        assert!(!exempt.contains("/user/login/"));
        assert!(!exempt.contains("/user/login/extra"));
        assert!(!exempt.contains("/USER/LOGIN"));
        assert!(!exempt.contains(""));
    }

    #[test]
    fn test_parse_list() {
        let exempt = ExemptPaths::parse_list(" /health, /user/login ,,");

        assert_eq!(exempt, ExemptPaths::new(["/health", "/user/login"]));
    }

    #[test]
    fn test_exempt_path_skips_header_check() {
        let (_, verifier) = issuer_and_verifier();

        let outcome = authenticate(&ExemptPaths::default(), &verifier, "/user/login", None);
        assert_eq!(outcome, AuthOutcome::Exempt);

        // Even a garbage header is ignored on an exempt path.
        let bad = header("garbage");
        let outcome = authenticate(&ExemptPaths::default(), &verifier, "/", Some(&bad));
        assert_eq!(outcome, AuthOutcome::Exempt);
    }

    #[test]
    fn test_missing_or_empty_header_rejected() {
        let (_, verifier) = issuer_and_verifier();
        let exempt = ExemptPaths::default();

        assert_eq!(
            authenticate(&exempt, &verifier, "/user/me", None),
            AuthOutcome::Rejected(AuthError::MalformedHeader)
        );

        let empty = header("");
        assert_eq!(
            authenticate(&exempt, &verifier, "/user/me", Some(&empty)),
            AuthOutcome::Rejected(AuthError::MalformedHeader)
        );

        let scheme_only = header("Bearer");
        assert_eq!(
            authenticate(&exempt, &verifier, "/user/me", Some(&scheme_only)),
            AuthOutcome::Rejected(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn test_non_utf8_header_rejected() {
        let (_, verifier) = issuer_and_verifier();
        let opaque = HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap();

        assert_eq!(
            authenticate(&ExemptPaths::default(), &verifier, "/user/me", Some(&opaque)),
            AuthOutcome::Rejected(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn test_valid_token_authenticates() {
        let (issuer, verifier) = issuer_and_verifier();
        let token = issuer.issue("a@example.com", Duration::hours(1)).unwrap();
        let value = header(&format!("Bearer {}", token));

        let outcome = authenticate(&ExemptPaths::default(), &verifier, "/user/me", Some(&value));

        assert_eq!(
            outcome,
            AuthOutcome::Authenticated(AuthenticatedUser {
                subject: "a@example.com".to_string()
            })
        );
    }

    #[test]
    fn test_expired_and_forged_tokens_rejected() {
        let (issuer, verifier) = issuer_and_verifier();
        let exempt = ExemptPaths::default();

        let expired = issuer.issue("a@example.com", Duration::seconds(-1)).unwrap();
        let value = header(&format!("Bearer {}", expired));
        assert_eq!(
            authenticate(&exempt, &verifier, "/user/me", Some(&value)),
            AuthOutcome::Rejected(AuthError::TokenExpired)
        );

        let other_key = Arc::new(SigningKey::from_secret(b"some-other-secret-0123456789abcdef"));
        let forged = TokenIssuer::new(other_key)
            .issue("a@example.com", Duration::hours(1))
            .unwrap();
        let value = header(&format!("Bearer {}", forged));
        assert_eq!(
            authenticate(&exempt, &verifier, "/user/me", Some(&value)),
            AuthOutcome::Rejected(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_custom_exempt_list() {
        let (_, verifier) = issuer_and_verifier();
        let mut exempt = ExemptPaths::new(["/status"]);
        exempt.insert("/metrics");

        assert_eq!(authenticate(&exempt, &verifier, "/metrics", None), AuthOutcome::Exempt);
        assert_eq!(
            authenticate(&exempt, &verifier, "/user/login", None),
            AuthOutcome::Rejected(AuthError::MalformedHeader)
        );
    }

    #[tokio::test]
    async fn test_auth_user_extractor_missing() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/user/me")
            .body(())
            .unwrap()
            .into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(
            result,
            Err(BackendError::Unauthorized(AuthError::MalformedHeader))
        ));
    }

    #[tokio::test]
    async fn test_auth_user_extractor_present() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/user/me")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(AuthenticatedUser {
            subject: "a@example.com".to_string(),
        });

        let AuthUser(user) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.subject, "a@example.com");
    }
}
