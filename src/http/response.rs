//! Response construction: template render, redirect, error page.

use askama::Template;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::subscription::Subscription;

/// The subscription page.
#[derive(Template)]
#[template(path = "view.html")]
pub struct ViewTemplate {
    pub subscription: Subscription,
}

/// Render the subscription page for a view action.
pub fn render_view(subscription: Subscription) -> Result<Html<String>, askama::Error> {
    let page = ViewTemplate { subscription };
    page.render().map(Html)
}

/// Redirect back to the feed page after a mutation, keeping the username.
pub fn redirect_to_feeds(username: &str) -> Response {
    let location = format!("/jsp/rss.jsp?username={}", username);
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Plain 500 whose body is the error's message text.
pub fn error_page(err: &dyn std::error::Error) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}
