//! The page that explains how to reset a forgotten password.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{LINK_STYLE, base, log_in_register},
};

fn forgot_password_template() -> Markup {
    let content = html! {
        div class="space-y-4 text-gray-900 dark:text-white"
        {
            p class="text-justify"
            {
                "Passwords can only be reset by whoever runs this server. Ask them to
                run the " code { "reset_password" } " program from the server's
                directory, pointing it at the database file and your email address:"
            }

            pre class="p-3 overflow-x-auto text-sm rounded bg-gray-100 dark:bg-gray-700"
            {
                code { "reset_password --db-path fintrack.db --email you@example.com" }
            }

            p
            {
                "The program will ask for the new password twice. Once it is done, "
                a href=(endpoints::LOG_IN_VIEW) class=(LINK_STYLE) { "log in" }
                " with the new password."
            }
        }
    };

    base(
        "Forgot Password",
        &[],
        &log_in_register("Forgot your password?", &content),
    )
}

/// Renders a page describing how the user's password can be reset.
pub async fn get_forgot_password_page() -> Response {
    forgot_password_template().into_response()
}
