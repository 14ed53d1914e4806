//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element at the bottom of
//! the page, either as the target of a failed htmx request or as an
//! out-of-band swap alongside a successful response. The page script hides
//! the container again after a few seconds.

use maud::{Markup, html};

/// A message for the user with a short headline and optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert on its own, for use as the response body of an htmx
    /// request that targets the alert container.
    pub fn into_html(self) -> Markup {
        let (container_style, icon, message, details) = match self {
            Alert::Success { message, details } => (
                "flex items-start p-4 text-sm text-green-800 border border-green-300 \
                rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400 \
                dark:border-green-800 shadow-lg",
                "✓",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "flex items-start p-4 text-sm text-red-800 border border-red-300 \
                rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 \
                dark:border-red-800 shadow-lg",
                "✕",
                message,
                details,
            ),
        };

        html! {
            div class=(container_style) role="alert"
            {
                span class="shrink-0 me-3 font-bold" aria-hidden="true" { (icon) }

                div
                {
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex h-8 w-8 \
                        items-center justify-center hover:opacity-75"
                    aria-label="Close"
                    onclick="hideAlert()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert wrapped in an out-of-band swap of the alert container
    /// so that it can be appended to a response that targets another element.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_html())
            }
        }
    }
}
