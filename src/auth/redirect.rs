//! Works out where to send a user after they log in.
//!
//! Only local paths are allowed as redirect targets, and the pages that are
//! part of the log-in flow are never targets, otherwise a user could be sent
//! in circles.

use axum::{extract::Request, http::Uri};
use tracing::{error, warn};

use crate::endpoints;

const EXCLUDED_TARGETS: [&str; 3] = [
    endpoints::LOG_IN_VIEW,
    endpoints::REGISTER_VIEW,
    endpoints::LOG_OUT,
];

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map_or(redirect_url, |(path, _)| path);

    !EXCLUDED_TARGETS.contains(&path)
}

/// Reduce `raw_url` to its path and query, or `None` if it is not a safe local path.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// `HX-Current-URL` holds the full URL of the page, so the scheme and host are dropped.
fn normalize_hx_current_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// The log-in page URL that sends the user back to the page behind `request`.
///
/// For API requests the page is read from the HTMX headers, otherwise the request URI is used.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let redirect_target = if request.uri().path().starts_with("/api") {
        redirect_target_from_hx_request(request)?
    } else {
        redirect_target_from_request_uri(request)?
    };

    build_log_in_redirect_url_from_target(&redirect_target)
}

pub(super) fn build_log_in_redirect_url_from_target(redirect_target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", redirect_target)]) {
        Ok(param) => Some(format!("{}?{}", endpoints::LOG_IN_VIEW, param)),
        Err(error) => {
            error!("Could not encode redirect URL {redirect_target}: {error}");
            None
        }
    }
}

fn redirect_target_from_request_uri(request: &Request) -> Option<String> {
    let path_and_query = request.uri().path_and_query()?.as_str();
    normalize_redirect_url(path_and_query)
}

fn redirect_target_from_hx_request(request: &Request) -> Option<String> {
    let headers = request.headers();
    let is_hx_request = headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"));

    if !is_hx_request {
        warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    else {
        warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    let redirect_url = normalize_hx_current_url(current_url);
    if redirect_url.is_none() {
        warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::Request};

    use crate::endpoints;

    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn keeps_local_path_and_query() {
        assert_eq!(
            normalize_redirect_url("/home?page=2"),
            Some("/home?page=2".to_owned())
        );
    }

    #[test]
    fn rejects_external_urls() {
        assert_eq!(normalize_redirect_url("https://evil.example.com/home"), None);
        assert_eq!(normalize_redirect_url("//evil.example.com/home"), None);
        assert_eq!(normalize_redirect_url("home"), None);
    }

    #[test]
    fn rejects_log_in_flow_pages() {
        assert_eq!(normalize_redirect_url(endpoints::LOG_IN_VIEW), None);
        assert_eq!(normalize_redirect_url(endpoints::REGISTER_VIEW), None);
        assert_eq!(normalize_redirect_url(endpoints::LOG_OUT), None);
    }

    #[test]
    fn page_request_uses_request_uri() {
        let request = Request::builder()
            .uri("/users/alice/transactions?page=3")
            .body(Body::empty())
            .unwrap();

        let want = format!(
            "{}?{}",
            endpoints::LOG_IN_VIEW,
            serde_urlencoded::to_string([("redirect_url", "/users/alice/transactions?page=3")])
                .unwrap()
        );
        assert_eq!(build_log_in_redirect_url(&request), Some(want));
    }

    #[test]
    fn api_request_uses_hx_current_url() {
        let request = Request::builder()
            .uri("/api/transactions/1")
            .header("HX-Request", "true")
            .header("HX-Current-URL", "http://localhost:3000/transactions/1")
            .body(Body::empty())
            .unwrap();

        let want = format!(
            "{}?{}",
            endpoints::LOG_IN_VIEW,
            serde_urlencoded::to_string([("redirect_url", "/transactions/1")]).unwrap()
        );
        assert_eq!(build_log_in_redirect_url(&request), Some(want));
    }

    #[test]
    fn api_request_without_htmx_headers_has_no_target() {
        let request = Request::builder()
            .uri("/api/transactions/1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(build_log_in_redirect_url(&request), None);
    }
}
