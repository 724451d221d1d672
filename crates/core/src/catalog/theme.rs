//! Quick theme shortcuts on the recommendation screen.

use super::query::{CatalogQuery, TagSet};

/// A one-click preset that rewrites part of a [`CatalogQuery`].
///
/// Tag presets replace the selected tags; season presets replace the
/// free-text query. Whatever the preset does not touch is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    Men,
    Women,
    Date,
    Fresh,
    SpringSummer,
    FallWinter,
}

impl ThemePreset {
    pub const ALL: [Self; 6] = [
        Self::Men,
        Self::Women,
        Self::Date,
        Self::Fresh,
        Self::SpringSummer,
        Self::FallWinter,
    ];

    /// Parse from URL parameter value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.slug() == s)
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Date => "date",
            Self::Fresh => "fresh",
            Self::SpringSummer => "spring-summer",
            Self::FallWinter => "fall-winter",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "남성",
            Self::Women => "여성",
            Self::Date => "데이트",
            Self::Fresh => "청량한",
            Self::SpringSummer => "봄/여름",
            Self::FallWinter => "가을/겨울",
        }
    }

    #[must_use]
    pub const fn label_en(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Date => "Date",
            Self::Fresh => "Fresh",
            Self::SpringSummer => "Spring/Summer",
            Self::FallWinter => "Fall/Winter",
        }
    }

    /// Rewrite `query` according to the preset.
    #[must_use]
    pub fn apply(self, mut query: CatalogQuery) -> CatalogQuery {
        match self {
            Self::Men => query.tags = TagSet::from_iter(["남성"]),
            Self::Women => query.tags = TagSet::from_iter(["여성"]),
            Self::Date => query.tags = TagSet::from_iter(["데이트", "ROMANTIC"]),
            Self::Fresh => query.tags = TagSet::from_iter(["청량한", "FRESH"]),
            Self::SpringSummer => query.query = "플로럴".to_string(),
            Self::FallWinter => query.query = "우디".to_string(),
        }
        query
    }
}
