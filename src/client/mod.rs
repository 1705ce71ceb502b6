//! Client layer: owns the session token, orchestrates transport calls and maps
//! transport ↔ domain.

mod http;

use std::error::Error as StdError;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

use self::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::domain::{
    AddOrder, ChangeStatus, CheckPhone, CheckStatus, Login, OrderDetails, Password, ServiceError,
    Token, ValidationError,
};
use crate::transport::{self, ApiCall};

const DEFAULT_BASE_URL: &str = "https://api.peshkariki.ru/commonApi/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_USER_AGENT: &str = concat!("peshkariki-rust/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
/// Login/password pair used to obtain tokens. Immutable for the client's lifetime.
pub struct Credentials {
    login: Login,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }
}

#[derive(Debug, Clone, Default)]
/// Per-call overrides layered over the client configuration.
pub struct RequestOptions {
    /// Replaces the client timeout for this call.
    pub timeout: Option<Duration>,
    /// Merged over the client headers; names compare case-insensitively.
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PeshkarikiClient`].
///
/// [`PeshkarikiError::Transport`], [`PeshkarikiError::HttpStatus`] and
/// [`PeshkarikiError::Parse`] are transport-level failures and are never retried.
/// [`PeshkarikiError::Service`] is the remote `success: false` verdict.
pub enum PeshkarikiError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code with a body that is not a response envelope.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// Peshkariki answered with `success: false`.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PeshkarikiError {
    /// Returns `true` for network, HTTP status and malformed-response failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Parse(_)
        )
    }

    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
    {
        Some(entry) => entry.1 = value.to_owned(),
        None => headers.push((name.to_owned(), value.to_owned())),
    }
}

fn parse_base_url(input: &str) -> Result<Url, ValidationError> {
    let mut normalized = input.trim().to_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|err| ValidationError::InvalidUrl {
        input: input.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ValidationError::InvalidUrl {
            input: input.to_owned(),
            reason: "cannot be used as a base URL".to_owned(),
        });
    }
    Ok(url)
}

#[derive(Debug, Clone)]
/// Builder for [`PeshkarikiClient`].
///
/// Use this when you need to customize the base URL, timeout, or headers.
pub struct PeshkarikiClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl PeshkarikiClientBuilder {
    /// Create a builder with the default base URL, a 5 second timeout and JSON headers.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            headers: vec![
                ("Accept".to_owned(), "application/json".to_owned()),
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("User-Agent".to_owned(), DEFAULT_USER_AGENT.to_owned()),
            ],
        }
    }

    /// Override the API base URL. Operation paths are joined onto it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Default timeout for every call; [`RequestOptions::timeout`] overrides it per call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header, replacing a default header of the same name.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        merge_header(&mut self.headers, name.as_ref(), value.as_ref());
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(self, user_agent: impl AsRef<str>) -> Self {
        self.header("User-Agent", user_agent)
    }

    /// Build a [`PeshkarikiClient`] and log in.
    ///
    /// Fails if the login call fails; a built client always holds a token.
    pub async fn build(self) -> Result<PeshkarikiClient, PeshkarikiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| PeshkarikiError::Transport(Box::new(err)))?;
        self.connect(Arc::new(ReqwestTransport::new(client))).await
    }

    async fn connect(
        self,
        http: Arc<dyn HttpTransport>,
    ) -> Result<PeshkarikiClient, PeshkarikiError> {
        let endpoint = Endpoint {
            base_url: parse_base_url(&self.base_url)?,
            headers: self.headers,
            timeout: self.timeout,
            http,
        };
        let token = fetch_token(&endpoint, &self.credentials).await?;

        Ok(PeshkarikiClient {
            endpoint: Arc::new(endpoint),
            credentials: Arc::new(self.credentials),
            token: Arc::new(RwLock::new(token)),
        })
    }
}

struct Endpoint {
    base_url: Url,
    headers: Vec<(String, String)>,
    timeout: Duration,
    http: Arc<dyn HttpTransport>,
}

impl Endpoint {
    /// POST `body` to `path` and unwrap the envelope. No token handling here.
    async fn post(
        &self,
        path: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Value, PeshkarikiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| ValidationError::InvalidUrl {
                input: path.to_owned(),
                reason: err.to_string(),
            })?;

        let mut headers = self.headers.clone();
        for (name, value) in &options.headers {
            merge_header(&mut headers, name, value);
        }
        let request = HttpRequest {
            url: url.into(),
            headers,
            body: Value::Object(body),
            timeout: options.timeout.unwrap_or(self.timeout),
        };

        debug!(url = %request.url, "making POST request");
        let response = self
            .http
            .post_json(&request)
            .await
            .map_err(PeshkarikiError::Transport)?;

        let envelope = match transport::decode_envelope(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !(200..=299).contains(&response.status) => {
                let body = if response.body.trim().is_empty() {
                    None
                } else {
                    Some(response.body)
                };
                return Err(PeshkarikiError::HttpStatus {
                    status: response.status,
                    body,
                });
            }
            Err(err) => return Err(PeshkarikiError::Parse(Box::new(err))),
        };

        envelope.map_err(|err| {
            debug!(code = %err.code(), "service returned an error");
            PeshkarikiError::Service(err)
        })
    }
}

async fn fetch_token(
    endpoint: &Endpoint,
    credentials: &Credentials,
) -> Result<Token, PeshkarikiError> {
    let call = transport::encode_login(&credentials.login, &credentials.password);
    let payload = endpoint
        .post(call.path, call.body, &RequestOptions::default())
        .await?;
    let token = transport::decode_login_payload(payload)
        .map_err(|err| PeshkarikiError::Parse(Box::new(err)))?;
    info!(login = credentials.login.as_str(), "obtained access token");
    Ok(token)
}

#[derive(Clone)]
/// High-level Peshkariki client.
///
/// Construction logs in; every operation then carries the cached token. When the service
/// answers with the invalid-token code (12) the client logs in once more and repeats the
/// call once. Clones share the token.
///
/// Operations return the `response` payload of the envelope as untyped JSON.
pub struct PeshkarikiClient {
    endpoint: Arc<Endpoint>,
    credentials: Arc<Credentials>,
    token: Arc<RwLock<Token>>,
}

impl PeshkarikiClient {
    /// Create a client with the default configuration and log in.
    ///
    /// For more customization, use [`PeshkarikiClient::builder`].
    pub async fn new(credentials: Credentials) -> Result<Self, PeshkarikiError> {
        Self::builder(credentials).build().await
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> PeshkarikiClientBuilder {
        PeshkarikiClientBuilder::new(credentials)
    }

    /// The token currently attached to requests.
    pub fn token(&self) -> Token {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Log in again and replace the cached token.
    pub async fn login(&self) -> Result<Token, PeshkarikiError> {
        let token = fetch_token(&self.endpoint, &self.credentials).await?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.clone();
        Ok(token)
    }

    async fn request_with_token(
        &self,
        path: &str,
        body: &Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Value, PeshkarikiError> {
        let mut body = body.clone();
        body.insert(
            Token::FIELD.to_owned(),
            Value::String(self.token().as_str().to_owned()),
        );
        self.endpoint.post(path, body, options).await
    }

    #[tracing::instrument(skip(self, body, options))]
    async fn request_with_auth_retry(
        &self,
        path: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Value, PeshkarikiError> {
        match self.request_with_token(path, &body, options).await {
            Err(PeshkarikiError::Service(err)) if err.is_invalid_token() => {
                warn!(additional = ?err.additional(), "token rejected, logging in again");
                self.login().await?;
                self.request_with_token(path, &body, options).await
            }
            result => result,
        }
    }

    async fn dispatch(&self, call: ApiCall) -> Result<Value, PeshkarikiError> {
        self.request_with_auth_retry(call.path, call.body, &RequestOptions::default())
            .await
    }

    /// Call an arbitrary API method with the token attached and the invalid-token retry.
    pub async fn call(
        &self,
        path: &str,
        body: Map<String, Value>,
    ) -> Result<Value, PeshkarikiError> {
        self.call_with_options(path, body, &RequestOptions::default())
            .await
    }

    /// Like [`PeshkarikiClient::call`], with per-call timeout and header overrides.
    pub async fn call_with_options(
        &self,
        path: &str,
        body: Map<String, Value>,
        options: &RequestOptions,
    ) -> Result<Value, PeshkarikiError> {
        self.request_with_auth_retry(path, body, options).await
    }

    /// Query status of one order or a batch of orders (`checkStatus`).
    pub async fn check_status(&self, request: CheckStatus) -> Result<Value, PeshkarikiError> {
        self.dispatch(transport::encode_check_status(&request))
            .await
    }

    /// Price or publish orders (`addOrder`).
    ///
    /// With [`crate::OrderMode::Calculate`] the service only computes the cost.
    pub async fn add_order(&self, request: AddOrder) -> Result<Value, PeshkarikiError> {
        let call = transport::encode_add_order(&request)
            .map_err(|err| PeshkarikiError::Encode(Box::new(err)))?;
        self.dispatch(call).await
    }

    /// Fetch details of one order or a batch of orders.
    ///
    /// The request goes to the `addOrder` method with an `order_id` body, which is how the
    /// service exposes order details; there is no separate method for it.
    pub async fn get_order_details(
        &self,
        request: OrderDetails,
    ) -> Result<Value, PeshkarikiError> {
        self.dispatch(transport::encode_order_details(&request))
            .await
    }

    /// List additional services and their ids (`getServicesList`).
    pub async fn get_services_list(&self) -> Result<Value, PeshkarikiError> {
        self.dispatch(transport::encode_get_services_list()).await
    }

    /// Account balance (`checkBalance`).
    pub async fn check_balance(&self) -> Result<Value, PeshkarikiError> {
        self.dispatch(transport::encode_check_balance()).await
    }

    /// Check one phone number or a batch of numbers (`checkPhone`).
    pub async fn check_phone(&self, request: CheckPhone) -> Result<Value, PeshkarikiError> {
        self.dispatch(transport::encode_check_phone(&request))
            .await
    }

    /// Revoke the current token (`revokeToken`).
    ///
    /// The cached token is kept; the next call is rejected with code 12 and triggers a
    /// fresh login.
    pub async fn revoke_token(&self) -> Result<Value, PeshkarikiError> {
        self.dispatch(transport::encode_revoke_token()).await
    }

    /// Change the status of one or more orders (`changeStatus`).
    pub async fn change_status(&self, request: ChangeStatus) -> Result<Value, PeshkarikiError> {
        let call = transport::encode_change_status(&request)
            .map_err(|err| PeshkarikiError::Encode(Box::new(err)))?;
        self.dispatch(call).await
    }
}
