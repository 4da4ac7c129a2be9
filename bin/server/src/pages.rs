//! Page components for the application.

pub mod home;

pub use home::HomePage;

use crate::fragments::render;
use leptos::prelude::*;

/// Renders the index page as a full document.
#[must_use]
pub fn index() -> String {
    render(|| {
        view! {
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <title>"Language Learning Buddy"</title>
                    <link rel="stylesheet" href="/static/style.css"/>
                    <script src="https://unpkg.com/htmx.org@1.9.12"></script>
                </head>
                <body>
                    <HomePage/>
                </body>
            </html>
        }
    })
}
