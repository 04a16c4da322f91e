//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making JSON requests.
//! Errors are returned as user-presentable strings.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/system/users");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Appends `query` to `path` as a query string.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

/// GET `path` and decode the JSON body. `what` names the resource in error messages.
pub async fn get_json<T: DeserializeOwned>(path: &str, what: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    decode(response, what).await
}

/// POST `body` as JSON to `path` and decode the JSON answer.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    what: &str,
) -> Result<T, String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    decode(response, what).await
}

/// PUT `body` as JSON to `path`, ignoring the response body.
pub async fn put_json<B: Serialize>(path: &str, body: &B, what: &str) -> Result<(), String> {
    let response = Request::put(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, what).await);
    }
    Ok(())
}

async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response, what).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// The backend answers errors with `{"error": "..."}`; fall back to the status code.
async fn error_message(response: Response, what: &str) -> String {
    let status = response.status();
    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body["error"].as_str().map(str::to_string));
    match detail {
        Some(detail) => format!("Failed to {}: {}", what, detail),
        None => format!("Failed to {}: {}", what, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::paging::PageRequest;
    use contracts::system::access::AccessPointsQuery;

    #[test]
    fn test_with_query_page_request() {
        let url = with_query("/api/system/users", &PageRequest::new(2, 10)).unwrap();
        assert_eq!(url, "/api/system/users?page=2&limit=10");
    }

    #[test]
    fn test_with_query_skips_missing_entitlement() {
        let url = with_query("/api/access/points", &AccessPointsQuery::new(1, 5, None)).unwrap();
        assert_eq!(url, "/api/access/points?page=1&limit=5");

        let url = with_query(
            "/api/access/points",
            &AccessPointsQuery::new(1, 5, Some("e-1".into())),
        )
        .unwrap();
        assert_eq!(url, "/api/access/points?page=1&limit=5&entitlement_id=e-1");
    }
}
