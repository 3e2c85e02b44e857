//! Authenticated fetch wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page code builds a [`RequestOptions`], and the wrapper adds the JSON
//! content-type default and the bearer token before handing the request to
//! a [`Transport`] (the browser's fetch in WASM builds).
//!
//! ERROR HANDLING
//! ==============
//! The wrapper adds no handling of its own: network failures come back as
//! [`FetchError::Network`] with the platform message, and non-2xx statuses
//! are returned as ordinary responses. There is no retry, timeout or
//! cancellation.


#[cfg(feature = "hydrate")]
pub mod gloo;

use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::session::{Session, SessionRecord, SessionStore};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP request method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Parse a method name, ignoring case. Unsupported verbs yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete]
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Request headers with case-insensitive names, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`, replacing every existing entry of that name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.entries.push((name.to_owned(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Ordered name/value fields sent as `multipart/form-data`.
///
/// The browser picks the content type (with its boundary) for these bodies,
/// so the wrapper never sets one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Request payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// Serialized text (JSON or anything else the caller chose).
    Text(String),
    Multipart(MultipartForm),
}

/// Caller-supplied request options. Defaults to a bare `GET`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Headers,
    pub body: Option<Body>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.set(name, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `value` as the request body.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be encoded as JSON.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        let text = serde_json::to_string(value)?;
        Ok(self.body(Body::Text(text)))
    }

    /// Build options from page-script arguments: a method name, a JSON object
    /// of header values and a text body. Missing or empty arguments keep the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Build`] for an unsupported method or for headers
    /// that are not a JSON object of strings.
    pub fn from_script(method: Option<&str>, headers: Option<&str>, body: Option<String>) -> Result<Self, FetchError> {
        let mut opts = Self::new();
        if let Some(raw) = method.filter(|m| !m.is_empty()) {
            opts.method = Method::parse(raw).ok_or_else(|| FetchError::Build(format!("unsupported method: {raw}")))?;
        }
        if let Some(json) = headers.filter(|h| !h.is_empty()) {
            let entries: BTreeMap<String, String> =
                serde_json::from_str(json).map_err(|e| FetchError::Build(format!("invalid headers: {e}")))?;
            for (name, value) in entries {
                opts.headers.set(&name, value);
            }
        }
        opts.body = body.map(Body::Text);
        Ok(opts)
    }

    fn is_multipart(&self) -> bool {
        matches!(self.body, Some(Body::Multipart(_)))
    }
}

/// Status and body text of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error for a body that is not a valid `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Platform request primitive.
pub trait Transport {
    fn send(&self, url: &str, opts: &RequestOptions) -> impl Future<Output = Result<FetchResponse, FetchError>>;
}

/// Add the content-type default and bearer token to `opts` in place.
///
/// - No `Content-Type` (or an empty one) and a non-multipart body: set it to
///   `json_content_type`.
/// - A token in `record`: set `Authorization: Bearer <token>`, replacing any
///   caller-supplied value.
pub fn prepare_request(opts: &mut RequestOptions, record: &SessionRecord, json_content_type: &str) {
    if !opts.is_multipart() && opts.headers.get(CONTENT_TYPE).is_none_or(str::is_empty) {
        opts.headers.set(CONTENT_TYPE, json_content_type);
    }
    if let Some(bearer) = record.bearer() {
        opts.headers.set(AUTHORIZATION, bearer);
    }
}

/// Prepare `opts` from the current session and send it through `transport`.
///
/// `opts` keeps the added headers after the call.
///
/// # Errors
///
/// Returns whatever the transport returns; the wrapper adds no failures.
pub async fn fetch_auth<S, T>(
    session: &Session<S>,
    transport: &T,
    json_content_type: &str,
    url: &str,
    opts: &mut RequestOptions,
) -> Result<FetchResponse, FetchError>
where
    S: SessionStore,
    T: Transport,
{
    prepare_request(opts, &session.read(), json_content_type);
    log::debug!("fetch {} {url}", opts.method.as_str());
    transport.send(url, opts).await
}
