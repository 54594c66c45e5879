//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as an out-of-band swap that replaces the
//! `#alert-container` element in the base page, so any HTMX response can
//! carry one alongside (or instead of) its main content.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A message shown to the user in a dismissable box at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

const SUCCESS_STYLE: &str = "text-green-800 border-green-300 bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_STYLE: &str = "text-red-800 border-red-300 bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

impl Alert {
    fn parts(&self) -> (&'static str, &str, Option<&str>) {
        match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, Some(details)),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        }
    }

    /// Render the alert as an out-of-band swap for `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = self.parts();
        let role = match self {
            Alert::Error { .. } | Alert::ErrorSimple { .. } => "alert",
            _ => "status",
        };

        // Alert layout adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role=(role)
                    class={ "flex items-start p-4 mb-4 text-sm border rounded-lg shadow " (style) }
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if let Some(details) = details
                        {
                            @if !details.is_empty()
                            {
                                p class="mt-1" { (details) }
                            }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="ms-3 font-bold"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
