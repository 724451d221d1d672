//! Recommendation page.
//!
//! The whole filter state lives in the query string. Edits (`add_tag`,
//! `remove_tag`, `theme`) are applied and answered with a redirect to the
//! canonical URL, so every rendered page is addressable.
//!
//! Selected tags travel as repeated `tags=` parameters, one per tag, so a
//! tag may contain any character.

use aion_core::{CatalogQuery, Product, SortMode, TagSet, ThemePreset};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;
use url::form_urlencoded;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::SelectOption;
use crate::state::AppState;

const PATH: &str = "/recommend";

/// Query parameters for `/recommend`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecommendParams {
    pub q: String,
    /// One entry per `tags=` parameter, in order.
    pub tags: Vec<String>,
    pub sort: String,
    pub add_tag: Option<String>,
    pub remove_tag: Option<String>,
    pub theme: Option<String>,
}

impl RecommendParams {
    /// Parse a raw query string. Unknown keys are ignored; for single-valued
    /// keys the last occurrence wins.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "q" => params.q = value,
                "tags" => params.tags.push(value),
                "sort" => params.sort = value,
                "add_tag" => params.add_tag = Some(value),
                "remove_tag" => params.remove_tag = Some(value),
                "theme" => params.theme = Some(value),
                _ => {}
            }
        }
        params
    }

    fn has_edits(&self) -> bool {
        self.add_tag.is_some() || self.remove_tag.is_some() || self.theme.is_some()
    }

    /// The query after applying any edits, in order: remove, add, theme.
    fn into_query(self) -> CatalogQuery {
        let mut query = CatalogQuery {
            query: self.q,
            tags: self.tags.iter().collect(),
            sort: SortMode::parse(&self.sort),
        };
        if let Some(tag) = self.remove_tag.as_deref() {
            query.tags.remove(tag);
        }
        if let Some(tag) = self.add_tag.as_deref() {
            query.tags.add(tag);
        }
        if let Some(preset) = self.theme.as_deref().and_then(ThemePreset::parse) {
            add_breadcrumb("recommend", "Applied theme", Some(&[("theme", preset.slug())]));
            query = preset.apply(query);
        }
        query
    }
}

/// Build the `/recommend` URL for `query`, with one optional extra parameter.
///
/// Default values are omitted.
#[must_use]
pub fn recommend_url(query: &CatalogQuery, extra: Option<(&str, &str)>) -> String {
    let mut params = Vec::new();
    if !query.query.trim().is_empty() {
        params.push(format!("q={}", urlencoding::encode(&query.query)));
    }
    for tag in query.tags.iter() {
        params.push(format!("tags={}", urlencoding::encode(tag)));
    }
    if query.sort != SortMode::default() {
        params.push(format!("sort={}", query.sort.as_str()));
    }
    if let Some((key, value)) = extra {
        params.push(format!("{key}={}", urlencoding::encode(value)));
    }

    if params.is_empty() {
        PATH.to_string()
    } else {
        format!("{PATH}?{}", params.join("&"))
    }
}

/// A selected tag with its removal link.
pub struct TagChip {
    pub label: String,
    pub remove_url: String,
}

/// A quick theme shortcut.
pub struct ThemeLink {
    pub label: &'static str,
    pub label_en: &'static str,
    pub url: String,
}

/// Recommendation page template.
#[derive(Template, WebTemplate)]
#[template(path = "recommend.html")]
pub struct RecommendTemplate {
    pub logged_in: bool,
    pub query: String,
    pub tags: Vec<String>,
    pub sort: &'static str,
    pub chips: Vec<TagChip>,
    pub sort_options: Vec<SelectOption>,
    pub themes: Vec<ThemeLink>,
    pub products: Vec<&'static Product>,
    pub is_filtered: bool,
}

impl RecommendTemplate {
    fn new(logged_in: bool, query: &CatalogQuery, products: Vec<&'static Product>) -> Self {
        let chips = query
            .tags
            .iter()
            .map(|tag| TagChip {
                label: tag.to_string(),
                remove_url: recommend_url(query, Some(("remove_tag", tag))),
            })
            .collect();
        let sort_options = SortMode::ALL
            .iter()
            .map(|mode| SelectOption::new(mode.as_str(), mode.label(), query.sort.as_str()))
            .collect();
        let themes = ThemePreset::ALL
            .iter()
            .map(|preset| ThemeLink {
                label: preset.label(),
                label_en: preset.label_en(),
                url: recommend_url(query, Some(("theme", preset.slug()))),
            })
            .collect();

        Self {
            logged_in,
            query: query.query.clone(),
            tags: query.tags.iter().map(str::to_owned).collect(),
            sort: query.sort.as_str(),
            chips,
            sort_options,
            themes,
            products,
            is_filtered: !query.query.trim().is_empty() || !query.tags.is_empty(),
        }
    }

    #[must_use]
    pub fn result_count(&self) -> usize {
        self.products.len()
    }
}

/// Display the recommendation page, or redirect after an edit.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    visitor: Visitor,
    RawQuery(raw): RawQuery,
) -> Response {
    let params = RecommendParams::from_query(raw.as_deref().unwrap_or_default());
    let edited = params.has_edits();
    let query = params.into_query();

    if edited {
        return Redirect::to(&recommend_url(&query, None)).into_response();
    }

    let products = state.catalog().search(&query);
    RecommendTemplate::new(visitor.is_logged_in(), &query, products).into_response()
}
