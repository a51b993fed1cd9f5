//! API utilities for frontend-backend communication
//!
//! The API is addressed by bare endpoint names (`fetch_orders`,
//! `update_order`, ...) appended to a configured base URL.

/// Normalize a base URL so that endpoints can be appended directly
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::normalize_base;
/// assert_eq!(normalize_base(" https://api.example.com "), "https://api.example.com/");
/// ```
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Build a full API URL from a base and an endpoint name
///
/// Leading slashes on the endpoint are ignored, so `"/fetch_orders"` and
/// `"fetch_orders"` resolve to the same URL.
pub fn api_url(base: &str, endpoint: &str) -> String {
    format!("{}{}", normalize_base(base), endpoint.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8000"), "http://localhost:8000/");
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000/");
        assert_eq!(normalize_base(""), "");
    }

    #[test]
    fn test_api_url() {
        assert_eq!(
            api_url("http://localhost:8000", "fetch_orders"),
            "http://localhost:8000/fetch_orders"
        );
        assert_eq!(
            api_url("https://api.example.com/v1/", "/update_order"),
            "https://api.example.com/v1/update_order"
        );
    }
}
