//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the path of the content-hashed stylesheet.
///
/// Falls back to the unhashed file when the build could not hash it.
///
/// Usage in templates: `{{ ""|stylesheet_path }}`
#[askama::filter_fn]
pub fn stylesheet_path(
    _value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(stylesheet_for_hash(env!("CSS_HASH")))
}

fn stylesheet_for_hash(hash: &str) -> String {
    if hash.is_empty() {
        "/static/css/main.css".to_string()
    } else {
        format!("/static/css/derived/main.{hash}.css")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_for_hash() {
        assert_eq!(
            stylesheet_for_hash("1a2b3c4d"),
            "/static/css/derived/main.1a2b3c4d.css"
        );
        assert_eq!(stylesheet_for_hash(""), "/static/css/main.css");
    }
}
