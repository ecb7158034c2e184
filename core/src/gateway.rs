//! Request gateway: one place that builds JSON requests and normalizes
//! responses.
//!
//! # Design
//! `build_request` and `parse_response` are pure functions over the plain-data
//! types in `http`, so the normalization rules are testable without a network.
//! `Gateway` glues them to a `Transport` and adds the `get`/`post`/`put`/`del`
//! helpers.
//!
//! Normalization rules:
//! - 2xx: the parsed JSON value, or `None` for an empty (or `null`) body.
//! - non-2xx with JSON: `ApiError::Http` whose message is the body's `error`
//!   string, falling back to the status reason phrase; the body is attached.
//! - non-2xx without JSON: `ApiError::Http` whose message is the raw text, or
//!   the reason phrase when the text is empty; no body.
//! - transport failure: `ApiError::Network`, no status.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// Executes a single HTTP round-trip.
///
/// Implementations must keep any session cookie the server sets and send it
/// back on later requests, and must report non-2xx statuses as an
/// `HttpResponse` rather than as a `TransportError`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Per-call options for `Gateway::call`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(HttpMethod::Get)
    }
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Build the `HttpRequest` for `url` with the JSON content type applied.
///
/// A caller-supplied content-type header wins over the default. The body is
/// only attached for methods that carry a payload.
pub fn build_request(url: &str, options: &RequestOptions) -> Result<HttpRequest, ApiError> {
    let mut headers = Vec::with_capacity(options.headers.len() + 1);
    if !options
        .headers
        .iter()
        .any(|(k, _)| k.eq_ignore_ascii_case(CONTENT_TYPE))
    {
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
    }
    headers.extend(options.headers.iter().cloned());

    let body = match &options.body {
        Some(value) if options.method.carries_payload() => Some(
            serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?,
        ),
        _ => None,
    };

    Ok(HttpRequest {
        method: options.method,
        path: url.to_string(),
        headers,
        body,
    })
}

/// Normalize a raw response into a parsed JSON value or an `ApiError`.
pub fn parse_response(response: &HttpResponse) -> Result<Option<Value>, ApiError> {
    let text = response.body.as_str();
    let parsed = if text.is_empty() {
        Ok(None)
    } else {
        serde_json::from_str::<Value>(text).map(Some)
    };
    let status = response.status;

    match parsed {
        Ok(data) => {
            let data = data.filter(|v| !v.is_null());
            if response.is_success() {
                return Ok(data);
            }
            let message = data
                .as_ref()
                .and_then(|v| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| response.status_text());
            Err(ApiError::Http {
                message,
                status,
                body: data,
            })
        }
        Err(e) if response.is_success() => Err(ApiError::Deserialization {
            message: e.to_string(),
            status: Some(status),
        }),
        Err(_) => Err(ApiError::Http {
            message: text.to_string(),
            status,
            body: None,
        }),
    }
}

/// Convert a parsed value into a DTO. An absent value decodes as JSON `null`.
pub fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|e| ApiError::Deserialization {
        message: e.to_string(),
        status: None,
    })
}

/// Serialize a payload into a JSON value for `RequestOptions::with_body`.
pub fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// A `Transport` plus the normalization rules above.
#[derive(Debug, Clone)]
pub struct Gateway<T> {
    transport: T,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one round-trip, mapping transport failures to `ApiError::Network`.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, url = %request.path, "sending request");
        match self.transport.execute(request) {
            Ok(response) => {
                tracing::debug!(
                    method = %request.method,
                    url = %request.path,
                    status = response.status,
                    "received response"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(method = %request.method, url = %request.path, error = %e, "transport failed");
                Err(ApiError::Network(e))
            }
        }
    }

    pub fn call(&self, url: &str, options: &RequestOptions) -> Result<Option<Value>, ApiError> {
        let request = build_request(url, options)?;
        let response = self.execute(&request)?;
        parse_response(&response)
    }

    pub fn get(&self, url: &str) -> Result<Option<Value>, ApiError> {
        self.call(url, &RequestOptions::default())
    }

    pub fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.call(url, &RequestOptions::new(HttpMethod::Post).with_body(to_json(body)?))
    }

    pub fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.call(url, &RequestOptions::new(HttpMethod::Put).with_body(to_json(body)?))
    }

    pub fn del(&self, url: &str) -> Result<Option<Value>, ApiError> {
        self.call(url, &RequestOptions::new(HttpMethod::Delete))
    }
}
