//! Static welcome page server
//!
//! Every GET, whatever the path, renders the same page with the current
//! server time. Other methods get 501.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use chrono::{DateTime, Local};
use minijinja::{context, Environment};
use tower_http::trace::TraceLayer;

use crate::types::format_timestamp;
use crate::Result;

const INDEX_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("index.html");

/// Compiled page template
#[derive(Clone)]
pub struct PageState {
    env: Arc<Environment<'static>>,
}

impl PageState {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env: Arc::new(env) })
    }

    /// Render the page for the given instant
    pub fn render(&self, now: &DateTime<Local>) -> Result<String> {
        let template = self.env.get_template(INDEX_NAME)?;
        let html = template.render(context! { now => format_timestamp(now) })?;
        Ok(html)
    }
}

/// Render the page once without keeping the environment around
pub fn render_page(now: &DateTime<Local>) -> Result<String> {
    PageState::new()?.render(now)
}

/// Build the page router
pub fn create_router(state: PageState) -> Router {
    Router::new()
        .fallback(serve_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_page(State(state): State<PageState>, method: Method) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (
            StatusCode::NOT_IMPLEMENTED,
            format!("Unsupported method ('{}')", method),
        )
            .into_response();
    }

    match state.render(&Local::now()) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn page_embeds_the_given_time() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let html = render_page(&now).unwrap();

        assert!(html.contains("My First Dockerized App!"));
        assert!(html.contains("Current time: 2024-05-01 12:30:00.000000"));
    }

    #[test]
    fn template_keeps_stylesheet_braces() {
        let html = render_page(&Local::now()).unwrap();
        assert!(html.contains("font-family: Arial;"));
        assert!(html.contains("<title>My Docker App</title>"));
    }
}
