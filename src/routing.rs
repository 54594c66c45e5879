//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_forgot_password_page, get_log_in_page, get_log_out,
        get_register_page, post_log_in, register_user,
    },
    budget::{
        create_budget_entry_endpoint, delete_budget_entry_endpoint, edit_budget_entry_endpoint,
        get_budget_entry_page, get_create_budget_page, get_edit_budget_page,
    },
    dashboard::{get_home_page, get_user_transactions_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    profile::{get_account_page, update_account_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_create_transaction_page, get_edit_transaction_page, get_transaction_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(
            endpoints::FORGOT_PASSWORD_VIEW,
            get(get_forgot_password_page),
        )
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::HOME_VIEW, get(get_home_page))
        .route(
            endpoints::USER_TRANSACTIONS_VIEW,
            get(get_user_transactions_page),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(endpoints::TRANSACTION_VIEW, get(get_transaction_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::NEW_BUDGET_VIEW, get(get_create_budget_page))
        .route(endpoints::BUDGET_VIEW, get(get_budget_entry_page))
        .route(endpoints::EDIT_BUDGET_VIEW, get(get_edit_budget_page))
        .route(endpoints::ACCOUNT_VIEW, get(get_account_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT/DELETE routes need to use the HX-REDIRECT header for auth redirects to work
    // properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION_API,
                put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
            )
            .route(endpoints::BUDGET_API, post(create_budget_entry_endpoint))
            .route(
                endpoints::BUDGET_ENTRY_API,
                put(edit_budget_entry_endpoint).delete(delete_budget_entry_endpoint),
            )
            .route(endpoints::ACCOUNT_API, put(update_account_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the home page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::HOME_VIEW)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use scraper::{Html, Selector};

    use crate::{
        AppState, PaginationConfig,
        auth::COOKIE_TOKEN,
        endpoints::{self, format_endpoint},
        test_utils::{TEST_PASSWORD, create_test_user, get_test_connection},
    };

    use super::{build_router, get_index_page};

    const ALICE_EMAIL: &str = "alice@example.com";

    fn get_test_server() -> TestServer {
        let connection = get_test_connection();
        create_test_user("alice", ALICE_EMAIL, &connection);
        create_test_user("bob", "bob@example.com", &connection);

        let state = AppState::new(
            connection,
            "a very secret secret",
            "Etc/UTC",
            PaginationConfig::default(),
        )
        .expect("Could not create app state");

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    async fn log_in(server: &TestServer, email: &str) -> Cookie<'static> {
        let response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("email", email), ("password", TEST_PASSWORD)])
            .await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

        response.cookie(COOKIE_TOKEN)
    }

    fn remaining_budget(html: &str) -> String {
        let document = Html::parse_document(html);
        let selector = Selector::parse("#remaining-budget").unwrap();

        document
            .select(&selector)
            .next()
            .expect("no remaining budget on the page")
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn root_redirects_to_home() {
        let response = axum::response::IntoResponse::into_response(get_index_page().await);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::HOME_VIEW);
    }

    #[tokio::test]
    async fn coffee_is_refused() {
        let server = get_test_server();

        server
            .get(endpoints::COFFEE)
            .await
            .assert_status(StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn pages_redirect_to_log_in_without_session() {
        let server = get_test_server();

        let response = server.get(endpoints::HOME_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        let location = location.to_str().unwrap();
        assert!(
            location.starts_with(endpoints::LOG_IN_VIEW),
            "got redirect to {location}"
        );
    }

    #[tokio::test]
    async fn api_routes_use_hx_redirect_without_session() {
        let server = get_test_server();

        let response = server
            .post(endpoints::BUDGET_API)
            .form(&[("amount_added", "10"), ("added_date", "2025-01-01")])
            .await;

        response.assert_status_ok();
        let location = response.header("hx-redirect");
        assert!(location.to_str().unwrap().starts_with(endpoints::LOG_IN_VIEW));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/definitely/not/a/page")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn budget_and_spending_update_remaining_budget() {
        let server = get_test_server();
        let cookie = log_in(&server, ALICE_EMAIL).await;

        server
            .post(endpoints::BUDGET_API)
            .add_cookie(cookie.clone())
            .form(&[("amount_added", "150"), ("added_date", "2025-01-01")])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        server
            .post(endpoints::TRANSACTIONS_API)
            .add_cookie(cookie.clone())
            .form(&[
                ("amount", "30"),
                ("date", "2025-01-02"),
                ("description", "Groceries"),
                ("category", "Food"),
                ("card_name", "Visa"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let response = server.get(endpoints::HOME_VIEW).add_cookie(cookie).await;

        response.assert_status_ok();
        assert_eq!(remaining_budget(&response.text()), "$120.00");
    }

    #[tokio::test]
    async fn other_users_cannot_delete_transaction() {
        let server = get_test_server();
        let alice = log_in(&server, ALICE_EMAIL).await;
        let bob = log_in(&server, "bob@example.com").await;

        server
            .post(endpoints::TRANSACTIONS_API)
            .add_cookie(alice.clone())
            .form(&[
                ("amount", "12.5"),
                ("date", "2025-01-02"),
                ("description", "Lunch"),
                ("category", "Food"),
                ("card_name", "Visa"),
            ])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        server
            .delete(&format_endpoint(endpoints::TRANSACTION_API, 1))
            .add_cookie(bob)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .get(&format_endpoint(endpoints::TRANSACTION_VIEW, 1))
            .add_cookie(alice)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn user_transactions_page_past_the_end_is_ok() {
        let server = get_test_server();
        let cookie = log_in(&server, ALICE_EMAIL).await;

        let url = format!(
            "{}?page=99",
            format_endpoint(endpoints::USER_TRANSACTIONS_VIEW, "alice")
        );
        let response = server.get(&url).add_cookie(cookie).await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        let rows = Selector::parse("tbody tr td a").unwrap();
        assert_eq!(document.select(&rows).count(), 0);
    }

    #[tokio::test]
    async fn user_transactions_page_is_not_found_for_unknown_user() {
        let server = get_test_server();
        let cookie = log_in(&server, ALICE_EMAIL).await;

        server
            .get(&format_endpoint(endpoints::USER_TRANSACTIONS_VIEW, "nobody"))
            .add_cookie(cookie)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
