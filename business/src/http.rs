//! Thin HTTP client returning owned, Send-safe responses.
//!
//! Commands return `Pin<Box<dyn Future<Output = ()> + Send>>`, so everything
//! crossing an `.await` here is plain data: status, lowercased headers and the
//! body bytes. All requests share one `reqwest::Client` with a cookie store, so
//! session cookies set by the API are sent back on later calls.

use std::collections::HashMap;
use std::sync::LazyLock;

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|err| {
            log::error!("http: falling back to a default client: {err}");
            reqwest::Client::new()
        })
});

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A simplified HTTP response that contains only Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Lowercased header names.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("request failed: {0}")]
    Transport(String),
}

pub type HttpResult<T> = Result<T, HttpError>;

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serializes `value` as the JSON body and sets `content-type`.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> HttpResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(|e| HttpError::Encode(e.to_string()))?;
        self.body = Some(bytes);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn send(self) -> HttpResult<Response> {
        let mut request = match self.method {
            Method::Get => CLIENT.get(&self.url),
            Method::Post => CLIENT.post(&self.url),
            Method::Put => CLIENT.put(&self.url),
            Method::Delete => CLIENT.delete(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        // Status and headers must be read before the body consumes the response.
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_owned());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Entry point for building requests.
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Delete, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status,
            headers: HashMap::new(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn success_is_any_2xx() {
        assert!(response(200, b"").is_success());
        assert!(response(201, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(301, b"").is_success());
        assert!(!response(404, b"").is_success());
        assert!(!response(500, b"").is_success());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut res = response(200, b"");
        res.headers
            .insert("content-type".to_owned(), "application/json".to_owned());

        assert_eq!(res.header("content-type"), Some("application/json"));
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        assert_eq!(res.header("x-missing"), None);
    }

    #[test]
    fn body_as_text_and_json() {
        #[derive(Debug, serde::Deserialize, PartialEq, Eq)]
        struct Body {
            success: bool,
        }

        let res = response(200, br#"{"success": true}"#);
        assert_eq!(res.text().unwrap(), r#"{"success": true}"#);
        assert_eq!(res.json::<Body>().unwrap(), Body { success: true });
    }

    #[test]
    fn json_body_sets_content_type() {
        let builder = Client::post("http://localhost/x")
            .header("Authorization", "abc")
            .json(&serde_json::json!({"a": 1}))
            .unwrap();

        assert_eq!(builder.method(), Method::Post);
        assert_eq!(builder.url(), "http://localhost/x");
        assert_eq!(
            builder.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            builder.headers.get("Authorization").map(String::as_str),
            Some("abc")
        );
        assert_eq!(builder.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }
}
