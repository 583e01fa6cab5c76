//! Tiny client-side query cache.
//!
//! Responses are cached by endpoint+params (the request path). Mutations
//! invalidate by path prefix; the next read for that key refetches.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

thread_local! {
    static CACHE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

/// API base URL, set at compile time for production builds.
pub const API_BASE: &str = match option_env!("NEWSFLOW_API_BASE") {
    Some(url) => url,
    None => "http://localhost:3000",
};

fn cache_get(key: &str) -> Option<String> {
    CACHE.with(|cache| cache.borrow().get(key).cloned())
}

fn cache_put(key: &str, body: String) {
    CACHE.with(|cache| {
        cache.borrow_mut().insert(key.to_string(), body);
    });
}

/// Drop every cached response whose key starts with `prefix`.
pub fn invalidate_prefix(prefix: &str) {
    CACHE.with(|cache| {
        cache.borrow_mut().retain(|key, _| !key.starts_with(prefix));
    });
}

/// GET through the cache. The path (with query string) is the cache key.
pub async fn cached_get<T: DeserializeOwned>(path_and_query: &str) -> Result<T, String> {
    if let Some(body) = cache_get(path_and_query) {
        return serde_json::from_str(&body).map_err(|e| format!("Parse error: {:?}", e));
    }

    let url = format!("{}{}", API_BASE, path_and_query);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| format!("Read error: {:?}", e))?;

    let parsed = serde_json::from_str(&body).map_err(|e| format!("Parse error: {:?}", e))?;
    cache_put(path_and_query, body);
    Ok(parsed)
}
