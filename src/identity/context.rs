use axum::http::HeaderMap;
use tracing::debug;

use super::principal::Identity;
use super::token::verify_token;

/// Per-request derived state threaded into every resolver invocation.
/// `identity` is `None` for anonymous callers; token verification failure
/// never rejects the request at the transport level.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub identity: Option<Identity>,
}

impl RequestContext {
    pub fn authenticated(identity: Identity) -> Self {
        Self { identity: Some(identity) }
    }

    /// Build the context from request headers. Reads `Authorization: Bearer
    /// <token>`; missing, malformed, expired or tampered tokens all degrade
    /// silently to an anonymous context.
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Self {
        let token = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        let identity = token.and_then(|t| verify_token(secret, t));
        if token.is_some() && identity.is_none() {
            debug!(target: "identity", "bearer token rejected, continuing anonymous");
        }
        Self { identity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::sign_token;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    const SECRET: &str = "ctx-test-secret";

    fn headers_with(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn missing_header_is_anonymous() {
        let ctx = RequestContext::from_headers(&HeaderMap::new(), SECRET);
        assert!(ctx.identity.is_none());
    }

    #[test]
    fn valid_bearer_is_authenticated() {
        let sid = Uuid::new_v4();
        let token = sign_token(SECRET, sid, "ana@x.com").unwrap();
        let ctx = RequestContext::from_headers(&headers_with(&format!("Bearer {token}")), SECRET);
        let ident = ctx.identity.expect("identity");
        assert_eq!(ident.subject_id, sid);
    }

    #[test]
    fn non_bearer_scheme_is_anonymous() {
        let ctx = RequestContext::from_headers(&headers_with("Basic dXNlcjpwdw=="), SECRET);
        assert!(ctx.identity.is_none());
    }

    #[test]
    fn invalid_token_is_anonymous_not_an_error() {
        let ctx = RequestContext::from_headers(&headers_with("Bearer nope"), SECRET);
        assert!(ctx.identity.is_none());
    }
}
