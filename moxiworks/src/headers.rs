//! Header assembly for every outbound request.

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, USER_AGENT,
};

use crate::credentials::Credentials;
use crate::error::{AuthError, ClientError, PlatformError};
use crate::session::Session;

/// Versioned media type identifying the platform API revision.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.moxi-platform+json;version=1";
/// Request body media type. Sent on GETs too, where the body is empty.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Client identification string.
pub const CLIENT_USER_AGENT: &str = "moxiworks_platform rust client";

/// Returns the `Authorization` value for the given credentials.
///
/// ## Errors
///
/// Returns `AuthError::CredentialsNotSet` when credentials are absent or
/// either part is empty.
pub fn basic_auth_value(credentials: Option<&Credentials>) -> Result<String, AuthError> {
    let credentials = credentials
        .filter(|c| c.is_ready())
        .ok_or(AuthError::CredentialsNotSet)?;
    let token = STANDARD.encode(format!(
        "{}:{}",
        credentials.identifier(),
        credentials.secret()
    ));
    Ok(format!("Basic {token}"))
}

/// Builds the fixed header set plus the session cookie, when one is held.
///
/// The credential check runs first, so an unconfigured client fails here
/// without touching the network.
///
/// ## Errors
///
/// - `AuthError::CredentialsNotSet` for missing or incomplete credentials
/// - `ClientError::InvalidHeader` if a credential or cookie cannot be carried
///   in a header
pub fn build_headers(
    credentials: Option<&Credentials>,
    session: &Session,
) -> Result<HeaderMap, PlatformError> {
    let auth = basic_auth_value(credentials)?;

    let mut headers = HeaderMap::with_capacity(5);
    let mut auth = HeaderValue::try_from(auth).map_err(|e| ClientError::InvalidHeader {
        name: "Authorization",
        reason: e.to_string(),
    })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    if let Some(cookie) = session.get() {
        let mut cookie = HeaderValue::try_from(cookie).map_err(|e| ClientError::InvalidHeader {
            name: "Cookie",
            reason: e.to_string(),
        })?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("abc", "123")
    }

    #[test]
    fn test_basic_auth_value() {
        // base64("abc:123")
        assert_eq!(
            basic_auth_value(Some(&creds())).unwrap(),
            "Basic YWJjOjEyMw=="
        );
    }

    #[test]
    fn test_fixed_headers_without_cookie() {
        let headers = build_headers(Some(&creds()), &Session::new()).unwrap();
        assert_eq!(headers.len(), 4);
        assert_eq!(headers[ACCEPT], ACCEPT_MEDIA_TYPE);
        assert_eq!(headers[CONTENT_TYPE], FORM_CONTENT_TYPE);
        assert_eq!(headers[USER_AGENT], CLIENT_USER_AGENT);
        assert_eq!(headers[AUTHORIZATION], "Basic YWJjOjEyMw==");
        assert!(headers.get(COOKIE).is_none());
    }

    #[test]
    fn test_cookie_added_when_session_holds_one() {
        let session = Session::new();
        session.set_if_absent(["_platform_session=xyz"]);
        let headers = build_headers(Some(&creds()), &session).unwrap();
        assert_eq!(headers.len(), 5);
        assert_eq!(headers[COOKIE], "_platform_session=xyz");
    }

    #[test]
    fn test_missing_credentials() {
        let err = build_headers(None, &Session::new()).unwrap_err();
        assert!(matches!(
            err,
            PlatformError::Auth(AuthError::CredentialsNotSet)
        ));
    }

    #[test]
    fn test_incomplete_credentials() {
        let partial = Credentials::new("abc", "");
        let err = build_headers(Some(&partial), &Session::new()).unwrap_err();
        assert!(matches!(err, PlatformError::Auth(_)));
    }

    #[test]
    fn test_secret_with_newline_is_encoded() {
        let bad = Credentials::new("abc", "1\n2");
        // base64 keeps the header value clean even for odd secrets
        assert!(build_headers(Some(&bad), &Session::new()).is_ok());
    }
}
