//! Request execution with tracing instrumentation.
//!
//! This module provides the [`PlatformClient`] struct for executing HTTP
//! requests against the platform with session continuity and auditing.

use std::fmt;
use std::sync::Arc;

use reqwest::header::SET_COOKIE;
use serde_json::Value;
use tracing::{Span, debug, instrument, warn};
use url::Url;

use crate::attributes::Attributes;
use crate::audit::{AuditRecord, AuditSink, TracingAuditSink, collect_headers};
use crate::config::PlatformConfig;
use crate::credentials::Credentials;
use crate::error::{ClientError, PlatformError, ResponseError};
use crate::headers::build_headers;
use crate::method::RestMethod;
use crate::response::{Envelope, validate};
use crate::session::Session;

/// Builder for configuring a [`PlatformClient`].
pub struct PlatformClientBuilder {
    config: PlatformConfig,
    credentials: Option<Credentials>,
    session: Option<Arc<Session>>,
    audit_sink: Option<Arc<dyn AuditSink>>,
}

impl PlatformClientBuilder {
    /// Creates a new builder for the given configuration.
    fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            credentials: None,
            session: None,
            audit_sink: None,
        }
    }

    /// Sets the credentials used for Basic authentication.
    ///
    /// A client built without credentials can be constructed, but every
    /// request fails with `AuthError::CredentialsNotSet` before any I/O.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Shares an existing session with the client being built.
    ///
    /// By default each built client starts with a fresh, empty session.
    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets where audit records go. Defaults to [`TracingAuditSink`].
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let client = PlatformClient::builder(config)
    ///     .audit_sink(Arc::new(MyImportLog::new(pool)))
    ///     .build()?;
    /// ```
    pub fn audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    /// Builds the [`PlatformClient`].
    ///
    /// The configuration's debug flag turns on reqwest's verbose connection
    /// logging. No timeout or retry policy is applied beyond reqwest's
    /// defaults.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<PlatformClient, PlatformError> {
        let http = reqwest::blocking::Client::builder()
            .connection_verbose(self.config.debug())
            .build()
            .map_err(ClientError::Build)?;

        Ok(PlatformClient {
            http,
            config: self.config,
            credentials: self.credentials,
            session: self.session.unwrap_or_default(),
            audit_sink: self
                .audit_sink
                .unwrap_or_else(|| Arc::new(TracingAuditSink)),
            audit_context: None,
        })
    }
}

impl fmt::Debug for PlatformClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformClientBuilder")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Blocking HTTP client for the platform.
///
/// Each call is one synchronous round trip: no retries, no background work.
/// Callers that want parallelism run calls on their own threads. Clones are
/// cheap and share the connection pool and the [`Session`].
///
/// ## Examples
///
/// ```rust,ignore
/// use moxiworks_platform::{Attributes, Credentials, PlatformClient, PlatformConfig, RestMethod};
///
/// let client = PlatformClient::new(
///     PlatformConfig::from_env()?,
///     Credentials::from_env()?,
/// )?;
///
/// let url = client.config().api_url("action_logs", None);
/// let envelope = client.send(
///     RestMethod::Get,
///     url,
///     &Attributes::new()
///         .with("moxi_works_agent_id", "abc123")
///         .with("partner_contact_id", "1234"),
/// )?;
/// println!("{} actions", envelope["actions"].as_array().map_or(0, Vec::len));
/// ```
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::blocking::Client,
    config: PlatformConfig,
    credentials: Option<Credentials>,
    session: Arc<Session>,
    audit_sink: Arc<dyn AuditSink>,
    audit_context: Option<String>,
}

impl PlatformClient {
    /// Creates a new builder for configuring a platform client.
    pub fn builder(config: PlatformConfig) -> PlatformClientBuilder {
        PlatformClientBuilder::new(config)
    }

    /// Creates a client with the given configuration and credentials.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: PlatformConfig, credentials: Credentials) -> Result<Self, PlatformError> {
        Self::builder(config).credentials(credentials).build()
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Returns the session shared by this client and its clones.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Returns the audit context attached to this client, if any.
    pub fn audit_context(&self) -> Option<&str> {
        self.audit_context.as_deref()
    }

    /// Returns a clone whose every request is reported to the audit sink
    /// under `context`.
    ///
    /// The clone shares this client's session and connection pool, so
    /// resource calls made through it behave exactly as through `self`.
    pub fn with_audit_context(&self, context: impl Into<String>) -> Self {
        Self {
            audit_context: Some(context.into()),
            ..self.clone()
        }
    }

    /// Sends one request and returns the validated response object.
    ///
    /// GET attributes are sent in the query string; all other methods send
    /// them as a form-encoded body. The first `set-cookie` seen is stored in
    /// the session and replayed on later requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - Credentials are missing or incomplete (before any I/O)
    /// - The request fails (network, connection, etc.)
    /// - The response body is not valid JSON
    /// - The response is not an object, or reports `fail` / `error`
    pub fn send(
        &self,
        method: RestMethod,
        url: Url,
        attributes: &Attributes,
    ) -> Result<Envelope, PlatformError> {
        self.execute(method, url, attributes, self.audit_context.as_deref())
    }

    /// Like [`send`](Self::send), and reports the round trip to the audit sink
    /// under `audit_context`.
    pub fn send_audited(
        &self,
        method: RestMethod,
        url: Url,
        attributes: &Attributes,
        audit_context: &str,
    ) -> Result<Envelope, PlatformError> {
        self.execute(method, url, attributes, Some(audit_context))
    }

    #[instrument(
        name = "platform_request",
        skip(self, method, url, attributes, audit_context),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    fn execute(
        &self,
        method: RestMethod,
        url: Url,
        attributes: &Attributes,
        audit_context: Option<&str>,
    ) -> Result<Envelope, PlatformError> {
        Span::current().record("http.url", url.as_str());

        let headers = build_headers(self.credentials.as_ref(), &self.session)?;

        let pairs = attributes.to_pairs();
        let mut request = self
            .http
            .request(method.to_reqwest(), url.clone())
            .headers(headers);
        request = if method.encodes_as_query() {
            request.query(&pairs)
        } else {
            request.form(&pairs)
        };

        debug!(attribute_count = pairs.len(), "Sending platform request");
        let response = request.send().map_err(|e| {
            Span::current().record("otel.status_code", "ERROR");
            warn!(error = %e, "Platform request failed");
            ClientError::Request(e)
        })?;

        let status_code = response.status().as_u16();
        Span::current().record("http.status_code", status_code);

        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());
        if self.session.set_if_absent(cookies) {
            debug!("Stored session cookie");
        }

        let response_headers = audit_context.map(|_| collect_headers(response.headers()));
        let body = response.text().map_err(ClientError::Request)?;
        debug!(http.status_code = status_code, content_length = body.len(), "Received platform response");

        if let (Some(context), Some(response_headers)) = (audit_context, response_headers) {
            self.audit_sink.record(&AuditRecord {
                endpoint: url.to_string(),
                method,
                attributes: attributes.clone(),
                response_headers,
                response_body: body.clone(),
                status_code,
                audit_context: context.to_string(),
            });
        }

        let decoded = match serde_json::from_str::<Value>(&body) {
            Ok(decoded) => decoded,
            Err(source) => {
                Span::current().record("otel.status_code", "ERROR");
                warn!(error = %source, "Platform response was not valid JSON");
                return Err(ResponseError::Parse { body, source }.into());
            }
        };

        let envelope = validate(decoded).inspect_err(|e| {
            Span::current().record("otel.status_code", "ERROR");
            warn!(error = %e, "Platform reported a failure");
        })?;

        Span::current().record("otel.status_code", "OK");
        Ok(envelope)
    }
}

impl fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("session", &self.session)
            .field("audit_context", &self.audit_context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, GENERIC_FAILURE_MESSAGE};
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{any, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Runs blocking client code off the async test thread.
    async fn blocking<T, F>(f: F) -> T
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f).await.unwrap()
    }

    fn client_for(uri: &str) -> PlatformClient {
        PlatformClient::new(
            PlatformConfig::parse(uri).unwrap(),
            Credentials::new("abc", "123"),
        )
        .unwrap()
    }

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<AuditRecord>>,
    }

    impl AuditSink for RecordingSink {
        fn record(&self, record: &AuditRecord) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    #[tokio::test]
    async fn test_get_sends_attributes_in_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/agents"))
            .and(query_param("moxi_works_company_id", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let result = blocking(move || {
            let client = client_for(&uri);
            let url = client.config().api_url("agents", None);
            client.send(
                RestMethod::Get,
                url,
                &Attributes::new().with("moxi_works_company_id", "c1"),
            )
        })
        .await;
        assert!(result.is_ok(), "request failed: {:?}", result.err());

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_form_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/action_logs"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("moxi_works_agent_id=a1"))
            .and(body_string_contains("title=Keys+picked+up"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Keys picked up"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let envelope = blocking(move || {
            let client = client_for(&uri);
            let url = client.config().api_url("action_logs", None);
            client.send(
                RestMethod::Post,
                url,
                &Attributes::new()
                    .with("moxi_works_agent_id", "a1")
                    .with("title", "Keys picked up"),
            )
        })
        .await
        .unwrap();
        assert_eq!(envelope["title"], "Keys picked up");

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_fixed_headers_are_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/agents/a1"))
            .and(header("authorization", "Basic YWJjOjEyMw=="))
            .and(header("accept", "application/vnd.moxi-platform+json;version=1"))
            .and(header("user-agent", "moxiworks_platform rust client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let result = blocking(move || {
            let client = client_for(&uri);
            let url = client.config().api_url("agents", Some("a1"));
            client.send(RestMethod::Get, url, &Attributes::new())
        })
        .await;
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials_never_touch_the_network() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let result = blocking(move || {
            let client = PlatformClient::builder(PlatformConfig::parse(&uri).unwrap())
                .build()
                .unwrap();
            let url = client.config().api_url("agents", None);
            client.send(RestMethod::Get, url, &Attributes::new())
        })
        .await;

        assert!(matches!(
            result,
            Err(PlatformError::Auth(AuthError::CredentialsNotSet))
        ));
    }

    #[tokio::test]
    async fn test_session_cookie_is_set_once_and_replayed() {
        let mock_server = MockServer::start().await;

        Mock::given(path("/api/first"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=first")
                    .set_body_json(json!({})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(path("/api/second"))
            .and(header("cookie", "session=first"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=second")
                    .set_body_json(json!({})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(path("/api/third"))
            .and(header("cookie", "session=first"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let cookie = blocking(move || {
            let client = client_for(&uri);
            for resource in ["first", "second", "third"] {
                let url = client.config().api_url(resource, None);
                client.send(RestMethod::Get, url, &Attributes::new()).unwrap();
            }
            client.session().get().map(str::to_string)
        })
        .await;

        assert_eq!(cookie.as_deref(), Some("session=first"));
    }

    #[tokio::test]
    async fn test_cookie_captured_from_failed_response() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(422)
                    .insert_header("set-cookie", "session=early")
                    .set_body_json(json!({"status": "fail", "messages": ["bad id"]})),
            )
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let (result, cookie) = blocking(move || {
            let client = client_for(&uri);
            let url = client.config().api_url("agents", Some("nope"));
            let result = client.send(RestMethod::Get, url, &Attributes::new());
            (result, client.session().get().map(str::to_string))
        })
        .await;

        match result {
            Err(PlatformError::Response(ResponseError::RemoteFailure { message })) => {
                assert_eq!(message, "bad id");
            }
            other => panic!("expected remote failure, got {other:?}"),
        }
        assert_eq!(cookie.as_deref(), Some("session=early"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let result = blocking(move || {
            let client = client_for(&uri);
            let url = client.config().api_url("agents", None);
            client.send(RestMethod::Get, url, &Attributes::new())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.is_parse_error());
        match err {
            PlatformError::Response(e) => assert_eq!(e.raw_body(), Some("<html>maintenance</html>")),
            other => panic!("expected response error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_array_is_remote_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let result = blocking(move || {
            let client = client_for(&uri);
            let url = client.config().api_url("agents", None);
            client.send(RestMethod::Get, url, &Attributes::new())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.is_remote_failure());
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_audit_record_emitted_only_with_context() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("x-request-id", "r-1")
                    .set_body_json(json!({"moxi_works_agent_id": "a1"})),
            )
            .mount(&mock_server)
            .await;

        let sink = Arc::new(RecordingSink::default());
        let uri = mock_server.uri();
        let client_sink = sink.clone();
        blocking(move || {
            let client = PlatformClient::builder(PlatformConfig::parse(&uri).unwrap())
                .credentials(Credentials::new("abc", "123"))
                .audit_sink(client_sink)
                .build()
                .unwrap();
            let url = client.config().api_url("action_logs", None);
            let attrs = Attributes::new().with("moxi_works_agent_id", "a1");

            client.send(RestMethod::Post, url.clone(), &attrs).unwrap();
            client
                .send_audited(RestMethod::Post, url.clone(), &attrs, "import-1")
                .unwrap();
            client
                .with_audit_context("import-2")
                .send(RestMethod::Post, url, &attrs)
                .unwrap();
        })
        .await;

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.audit_context, "import-1");
        assert_eq!(first.method, RestMethod::Post);
        assert_eq!(first.status_code, 201);
        assert!(first.endpoint.ends_with("/api/action_logs"));
        assert_eq!(first.attributes.get_scalar("moxi_works_agent_id").as_deref(), Some("a1"));
        assert_eq!(first.response_headers["x-request-id"], vec!["r-1"]);
        assert!(first.response_body.contains("a1"));

        assert_eq!(records[1].audit_context, "import-2");
    }

    #[test]
    fn test_clones_share_session() {
        let client = client_for("https://example.com");
        let audited = client.with_audit_context("ctx");
        client.session().set_if_absent(["s=1"]);
        assert_eq!(audited.session().get(), Some("s=1"));
        assert_eq!(audited.audit_context(), Some("ctx"));
        assert_eq!(client.audit_context(), None);
    }

    #[test]
    fn test_independent_clients_have_separate_sessions() {
        let a = client_for("https://example.com");
        let b = client_for("https://example.com");
        a.session().set_if_absent(["s=a"]);
        assert_eq!(b.session().get(), None);
    }

    #[test]
    fn test_shared_session_via_builder() {
        let session = Arc::new(Session::new());
        session.set_if_absent(["s=shared"]);
        let client = PlatformClient::builder(PlatformConfig::default())
            .session(session.clone())
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(client.session(), &session));
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let client = client_for("https://example.com");
        let debug = format!("{client:?}");
        assert!(debug.contains("abc"));
        assert!(!debug.contains("\"123\""));
    }
}
