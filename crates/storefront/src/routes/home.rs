//! Home page route handler.

use aion_core::Product;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;
use crate::middleware::Visitor;
use crate::models::{NoticeQuery, notice_message};
use crate::state::AppState;

/// Home page template: hero, featured collection, brand story, newsletter.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub logged_in: bool,
    pub notice: Option<String>,
    pub featured: &'static [Product],
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    visitor: Visitor,
    Query(query): Query<NoticeQuery>,
) -> impl IntoResponse {
    HomeTemplate {
        logged_in: visitor.is_logged_in(),
        notice: notice_message(&query),
        featured: state.catalog().featured(),
    }
}
