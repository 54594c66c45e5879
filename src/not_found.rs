//! Error pages for missing resources and forbidden actions.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The 404 page.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        let page = error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "Sorry, we can't find that page. You'll find lots to explore on the home page.",
        );

        (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
    }
}

/// The 403 page, shown when a user tries to change another user's data.
pub struct ForbiddenError;

impl IntoResponse for ForbiddenError {
    fn into_response(self) -> Response {
        let page = error_view(
            "Forbidden",
            "403",
            "You can't do that.",
            "Only the user who recorded this transaction can change or delete it.",
        );

        (StatusCode::FORBIDDEN, Html(page.into_string())).into_response()
    }
}

/// Fallback route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{ForbiddenError, get_404_not_found};
    use crate::test_utils::parse_html_document;

    #[tokio::test]
    async fn not_found_page_has_404_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let document = parse_html_document(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("404"));
    }

    #[tokio::test]
    async fn forbidden_page_has_403_status() {
        let response = ForbiddenError.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
