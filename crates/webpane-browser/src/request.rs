//! Page request construction.
//!
//! A [`PageRequest`] is plain data — the surface backend decides how to
//! issue it. Only GET and POST are buildable; every other method yields
//! `None`, which callers treat as "unsupported, do nothing".

use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Request parameters. For GET they become the query string; for POST
/// they are serialized as a JSON body.
pub type ParamMap = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl PageRequest {
    /// A bare GET request with no parameters. Used for in-place pop-up
    /// redirects.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a request from a URL, method, and optional parameters.
    ///
    /// GET appends parameters as `key=value` pairs joined with `&`.
    /// The values are NOT percent-encoded; values containing `&`, `=`,
    /// or spaces will corrupt the URL. POST serializes parameters as a
    /// JSON body with an `application/json` content type; if
    /// serialization fails the request is sent without a body.
    ///
    /// Returns `None` for any method other than GET or POST.
    pub fn build(url: &str, method: HttpMethod, params: Option<&ParamMap>) -> Option<Self> {
        match method {
            HttpMethod::Get => {
                let mut url = url.to_string();
                if let Some(params) = params.filter(|p| !p.is_empty()) {
                    url.push('?');
                    for (key, value) in params {
                        url.push_str(key);
                        url.push('=');
                        url.push_str(&literal_value(value));
                        url.push('&');
                    }
                    // trailing separator
                    url.pop();
                }
                Some(Self {
                    url,
                    method,
                    headers: Vec::new(),
                    body: None,
                })
            }
            HttpMethod::Post => {
                let mut headers = Vec::new();
                let mut body = None;
                if let Some(params) = params {
                    match serde_json::to_vec(params) {
                        Ok(data) => {
                            headers.push((
                                "Content-Type".to_string(),
                                "application/json".to_string(),
                            ));
                            body = Some(data);
                        }
                        Err(e) => {
                            warn!(error = %e, "POST body serialization failed, sending without body");
                        }
                    }
                }
                Some(Self {
                    url: url.to_string(),
                    method,
                    headers,
                    body,
                })
            }
            other => {
                warn!(method = %other, "unsupported request method");
                None
            }
        }
    }

    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Render a parameter value the way it appears in a query string:
/// strings unquoted, everything else in its JSON form.
fn literal_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
