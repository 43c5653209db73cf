//! HTTP handlers, organized by domain.
//!
//! Handlers stay mapping-only: parse the request, call the service,
//! wrap the result in the response envelope.

pub mod articles;
pub mod categories;
pub mod health;
pub mod tags;

use std::collections::HashMap;

use axum::http::HeaderMap;

use wikidocs_core::error::AppError;
use wikidocs_core::result::AppResult;
use wikidocs_service::article::SortOrder;
use wikidocs_service::RequestContext;

/// Header carrying the caller name recorded in audit fields.
pub const USER_HEADER: &str = "x-user-name";

/// Build the request context from the caller-name header.
///
/// Missing or non-UTF-8 headers fall back to the anonymous caller.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::anonymous)
}

/// Parse an optional numeric query parameter; absent means 0 (defaulted
/// downstream by the query types).
pub fn parse_u64(params: &HashMap<String, String>, key: &str) -> AppResult<u64> {
    match params.get(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| AppError::validation(format!("Invalid {key}: {raw}"))),
        None => Ok(0),
    }
}

/// Parse an optional comma-separated id list query parameter.
pub fn parse_id_list(params: &HashMap<String, String>, key: &str) -> AppResult<Vec<i32>> {
    let Some(raw) = params.get(key) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| AppError::validation(format!("Invalid {key}: {part}")))
        })
        .collect()
}

/// Parse the optional `sorting` query parameter.
pub fn parse_sort_order(params: &HashMap<String, String>) -> AppResult<SortOrder> {
    match params.get("sorting").map(String::as_str) {
        None | Some("none") => Ok(SortOrder::None),
        Some("ascending") => Ok(SortOrder::Ascending),
        Some("descending") => Ok(SortOrder::Descending),
        Some(other) => Err(AppError::validation(format!("Invalid sorting: {other}"))),
    }
}

/// The optional `part_name` query parameter.
pub fn parse_part_name(params: &HashMap<String, String>) -> Option<String> {
    params.get("part_name").cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_request_context_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("alice"));
        assert_eq!(request_context(&headers).username, "alice");
    }

    #[test]
    fn test_request_context_defaults_to_anonymous() {
        assert_eq!(request_context(&HeaderMap::new()).username, "anonymous");

        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static("   "));
        assert_eq!(request_context(&headers).username, "anonymous");
    }

    #[test]
    fn test_parse_u64_absent_is_zero() {
        assert_eq!(parse_u64(&params(&[]), "page").unwrap(), 0);
        assert_eq!(parse_u64(&params(&[("page", "3")]), "page").unwrap(), 3);
        assert!(parse_u64(&params(&[("page", "x")]), "page").is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            parse_id_list(&params(&[("tag_ids", "1, 2,3")]), "tag_ids").unwrap(),
            vec![1, 2, 3]
        );
        assert!(parse_id_list(&params(&[]), "tag_ids").unwrap().is_empty());
        assert!(parse_id_list(&params(&[("tag_ids", "1,x")]), "tag_ids").is_err());
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!(parse_sort_order(&params(&[])).unwrap(), SortOrder::None);
        assert_eq!(
            parse_sort_order(&params(&[("sorting", "descending")])).unwrap(),
            SortOrder::Descending
        );
        assert!(parse_sort_order(&params(&[("sorting", "sideways")])).is_err());
    }
}
