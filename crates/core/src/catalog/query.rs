//! Filter/sort pipeline over the catalog.
//!
//! A [`CatalogQuery`] is the whole state of the recommendation screen: a
//! free-text query, the selected preference tags and a sort mode. Applying
//! it is synchronous and total; the pipeline keeps no state between calls.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::Product;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Reverse of the catalog's natural order.
    #[default]
    Latest,
    PriceLow,
    PriceHigh,
    /// Descending rating; equal ratings keep their filtered order.
    Rating,
    /// Descending rating, ties broken by ascending id.
    Popular,
}

impl SortMode {
    /// All modes in the order the sort control lists them.
    pub const ALL: [Self; 5] = [
        Self::Latest,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
        Self::Popular,
    ];

    /// Parse from URL parameter value. Unknown values fall back to `latest`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "popular" => Self::Popular,
            _ => Self::Latest,
        }
    }

    /// Convert to URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Popular => "popular",
        }
    }

    /// Label shown in the sort control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Latest => "최신순",
            Self::PriceLow => "가격 낮은순",
            Self::PriceHigh => "가격 높은순",
            Self::Rating => "평점순",
            Self::Popular => "인기순",
        }
    }

    /// Reorder `products` in place.
    ///
    /// All sorts are stable.
    pub fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Latest => products.reverse(),
            Self::PriceLow => products.sort_by_key(|p| p.price),
            Self::PriceHigh => products.sort_by_key(|p| Reverse(p.price)),
            Self::Rating => products.sort_by_key(|p| Reverse(p.rating)),
            Self::Popular => products.sort_by_key(|p| (Reverse(p.rating), p.id)),
        }
    }
}

/// Ordered set of selected preference tags.
///
/// Tags keep their insertion order for display. Adding a tag that is
/// already present, or removing one that is absent, changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a tag. Surrounding whitespace is trimmed; the rest is kept
    /// verbatim, separators included.
    ///
    /// Returns `false` when the trimmed input is empty or already selected.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_owned());
        true
    }

    /// Remove a tag by exact value. Returns `false` if it was not selected.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Whether `tag` is selected (exact match).
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.add(tag.as_ref());
        }
        tags
    }
}

/// Parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text search over name, English name and category.
    pub query: String,
    pub tags: TagSet,
    pub sort: SortMode,
}

impl CatalogQuery {
    /// Filter `products` and return the matches in sort order.
    ///
    /// A blank query matches everything; any other query is matched as
    /// typed, surrounding whitespace included. The result only ever borrows
    /// from `products`; an empty result is a valid outcome.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = if self.query.trim().is_empty() {
            String::new()
        } else {
            self.query.to_lowercase()
        };
        let wanted: Vec<String> = self.tags.iter().map(str::to_lowercase).collect();

        let mut matched: Vec<&Product> = products
            .iter()
            .filter(|p| matches_text(p, &needle) && matches_tags(p, &wanted))
            .collect();
        self.sort.sort(&mut matched);
        matched
    }
}

/// Case-insensitive substring match on name, English name or category.
/// An empty needle matches everything.
fn matches_text(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || [product.name, product.name_en, product.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// True if any wanted tag is a case-insensitive substring of any product tag.
/// No wanted tags matches everything.
fn matches_tags(product: &Product, wanted: &[String]) -> bool {
    wanted.is_empty()
        || wanted.iter().any(|want| {
            product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(want.as_str()))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::catalog::Catalog;

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.as_u32()).collect()
    }

    fn run(query: &str, tags: &[&str], sort: SortMode) -> Vec<u32> {
        let q = CatalogQuery {
            query: query.to_string(),
            tags: tags.iter().collect(),
            sort,
        };
        ids(&q.apply(Catalog::seeded().products()))
    }

    #[test]
    fn test_query_matches_display_name() {
        assert_eq!(run("아폴론", &[], SortMode::Latest), vec![1]);
    }

    #[test]
    fn test_query_is_case_insensitive_on_english_name() {
        assert_eq!(run("zeus", &[], SortMode::Latest), vec![4]);
        assert_eq!(run("HeRa", &[], SortMode::Latest), vec![5]);
    }

    #[test]
    fn test_query_is_not_trimmed_before_matching() {
        assert!(run("아폴론 ", &[], SortMode::Latest).is_empty());
        assert!(run(" zeus", &[], SortMode::Latest).is_empty());
        // Inner spaces are part of the text.
        assert_eq!(run("아폴론의 빛", &[], SortMode::Latest), vec![1]);
    }

    #[test]
    fn test_query_matches_category() {
        // 우디 appears in the categories of 1 and 3
        assert_eq!(run("우디", &[], SortMode::Popular), vec![1, 3]);
    }

    #[test]
    fn test_blank_query_matches_all() {
        assert_eq!(run("   ", &[], SortMode::Popular).len(), 8);
    }

    #[test]
    fn test_tag_filter_women() {
        let mut result = run("", &["여성"], SortMode::Latest);
        result.sort_unstable();
        assert_eq!(result, vec![2, 5]);
    }

    #[test]
    fn test_tag_filter_is_or_across_selected_tags() {
        let mut result = run("", &["여성", "레더"], SortMode::Latest);
        result.sort_unstable();
        assert_eq!(result, vec![2, 5, 7]);
    }

    #[test]
    fn test_tag_filter_is_substring_and_case_insensitive() {
        // "fre" is a substring of "FRESH"
        let mut result = run("", &["fre"], SortMode::Latest);
        result.sort_unstable();
        assert_eq!(result, vec![3, 6]);
    }

    #[test]
    fn test_query_and_tags_combine() {
        assert_eq!(run("플로럴", &["웨딩"], SortMode::Latest), vec![5]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(run("헬리오스", &[], SortMode::Latest).is_empty());
        assert!(run("", &["없는태그"], SortMode::Popular).is_empty());
    }

    #[test]
    fn test_latest_reverses_natural_order() {
        assert_eq!(
            run("", &[], SortMode::Latest),
            vec![8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_price_high_starts_with_zeus() {
        let q = CatalogQuery {
            sort: SortMode::PriceHigh,
            ..CatalogQuery::default()
        };
        let results = q.apply(Catalog::seeded().products());
        let first = results.first().copied();
        assert_eq!(first.map(|p| p.price.amount()), Some(420_000));
        assert_eq!(first.map(|p| p.id.as_u32()), Some(4));
    }

    #[test]
    fn test_price_low_is_reverse_of_price_high() {
        for tags in [&[][..], &["여성"][..], &["남성", "중성"][..]] {
            let mut low = run("", tags, SortMode::PriceLow);
            let high = run("", tags, SortMode::PriceHigh);
            low.reverse();
            assert_eq!(low, high);
        }
    }

    #[test]
    fn test_rating_sort_is_stable() {
        // Equal ratings keep natural order.
        assert_eq!(
            run("", &[], SortMode::Rating),
            vec![1, 2, 3, 4, 5, 6, 8, 7]
        );
    }

    #[test]
    fn test_popular_breaks_ties_by_id() {
        // Ties broken by id even when the filtered order is reversed.
        let mut products: Vec<&Product> = Catalog::seeded().products().iter().rev().collect();
        SortMode::Popular.sort(&mut products);
        assert_eq!(ids(&products), vec![1, 2, 3, 4, 5, 6, 8, 7]);
    }

    #[test]
    fn test_results_are_a_subset_without_duplicates() {
        let catalog = Catalog::seeded();
        let all: HashSet<u32> = catalog.products().iter().map(|p| p.id.as_u32()).collect();
        for query in ["", "의", "아", "WOOD", "& "] {
            for tags in [&[][..], &["봄"][..], &["남", "여"][..]] {
                for sort in SortMode::ALL {
                    let result = run(query, tags, sort);
                    let unique: HashSet<u32> = result.iter().copied().collect();
                    assert_eq!(unique.len(), result.len());
                    assert!(unique.is_subset(&all));
                }
            }
        }
    }

    #[test]
    fn test_sort_is_a_permutation_of_filtered_set() {
        for sort in SortMode::ALL {
            let mut sorted = run("", &["우디", "플로럴"], sort);
            let mut unsorted = run("", &["우디", "플로럴"], SortMode::Latest);
            sorted.sort_unstable();
            unsorted.sort_unstable();
            assert_eq!(sorted, unsorted);
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let q = CatalogQuery {
            query: "의".to_string(),
            tags: TagSet::from_iter(["봄", "남성"]),
            sort: SortMode::Popular,
        };
        let products = Catalog::seeded().products();
        assert_eq!(q.apply(products), q.apply(products));
    }

    #[test]
    fn test_sort_mode_parse_roundtrip_and_fallback() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::parse(mode.as_str()), mode);
        }
        assert_eq!(SortMode::parse("bestseller"), SortMode::Latest);
        assert_eq!(SortMode::parse(""), SortMode::Latest);
    }

    #[test]
    fn test_tag_add_is_idempotent() {
        let mut tags = TagSet::new();
        assert!(tags.add("플로럴"));
        assert!(!tags.add("플로럴"));
        assert!(!tags.add("  플로럴 "));
        assert!(!tags.add("   "));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_tag_remove_absent_is_noop() {
        let mut tags = TagSet::from_iter(["플로럴", "데이트"]);
        assert!(!tags.remove("우디"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["플로럴", "데이트"]);
        assert!(tags.remove("플로럴"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["데이트"]);
    }

    #[test]
    fn test_tag_from_iter_drops_blanks_and_duplicates() {
        let tags = TagSet::from_iter([" 봄 ", "", "봄", "여름"]);
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["봄", "여름"]);
    }

    #[test]
    fn test_tag_with_comma_is_one_tag() {
        let mut tags = TagSet::new();
        assert!(tags.add("플로럴,봄"));
        assert!(tags.add("봄"));
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("플로럴,봄"));

        let q = CatalogQuery {
            tags: TagSet::from_iter(["플로럴,봄"]),
            ..CatalogQuery::default()
        };
        assert!(q.apply(Catalog::seeded().products()).is_empty());
    }
}
