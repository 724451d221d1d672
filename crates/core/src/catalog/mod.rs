//! The AION perfume catalog.
//!
//! The catalog is a fixed, seeded list of [`Product`] records. It has no
//! create/update/delete lifecycle; screens only read it through
//! [`Catalog::search`], which runs the filter/sort pipeline in [`query`].

pub mod query;
pub mod theme;

use serde::Serialize;

use crate::types::{Price, ProductId, Rating};

pub use query::{CatalogQuery, SortMode, TagSet};
pub use theme::ThemePreset;

/// Number of leading catalog entries shown as the homepage collection.
pub const FEATURED_COUNT: usize = 4;

/// A perfume in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    /// Korean display name.
    pub name: &'static str,
    pub name_en: &'static str,
    /// Name of the deity the scent is modelled on, in Greek.
    pub myth: &'static str,
    pub category: &'static str,
    pub price: Price,
    /// Free-text preference tags, in display order.
    pub tags: &'static [&'static str],
    pub description: &'static str,
    pub rating: Rating,
}

impl Product {
    /// First character of the display name, used as a thumbnail monogram.
    #[must_use]
    pub fn monogram(&self) -> char {
        self.name.chars().next().unwrap_or('A')
    }
}

/// Read-only view over the seeded product list.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
}

impl Catalog {
    /// The catalog seeded at load.
    #[must_use]
    pub const fn seeded() -> Self {
        Self { products: &SEED }
    }

    /// All products in natural (seed) order.
    #[must_use]
    pub const fn products(&self) -> &'static [Product] {
        self.products
    }

    /// Products highlighted on the homepage.
    #[must_use]
    pub fn featured(&self) -> &'static [Product] {
        let end = FEATURED_COUNT.min(self.products.len());
        self.products.get(..end).unwrap_or_default()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&'static Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Run the filter/sort pipeline over the whole catalog.
    #[must_use]
    pub fn search(&self, query: &CatalogQuery) -> Vec<&'static Product> {
        let results = query.apply(self.products);
        tracing::debug!(
            query = %query.query,
            tags = query.tags.len(),
            sort = query.sort.as_str(),
            matched = results.len(),
            "Catalog search"
        );
        results
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

const fn stars(value: u8) -> Rating {
    match Rating::new(value) {
        Ok(rating) => rating,
        Err(_) => panic!("seed rating out of range"),
    }
}

static SEED: [Product; 8] = [
    Product {
        id: ProductId::new(1),
        name: "아폴론의 빛",
        name_en: "APOLLO'S RADIANCE",
        myth: "Ἀπόλλων",
        category: "시트러스 & 우디",
        price: Price::won(385_000),
        tags: &["시트러스", "우디", "중성", "데일리", "여름"],
        description: "태양신의 광채를 담은 밝고 따뜻한 향",
        rating: stars(5),
    },
    Product {
        id: ProductId::new(2),
        name: "아프로디테의 정원",
        name_en: "APHRODITE'S GARDEN",
        myth: "Ἀφροδίτη",
        category: "플로럴 & 머스크",
        price: Price::won(365_000),
        tags: &["플로럴", "머스크", "여성", "데이트", "ROMANTIC", "봄"],
        description: "사랑의 여신이 거니는 장미 정원의 향기",
        rating: stars(5),
    },
    Product {
        id: ProductId::new(3),
        name: "아르테미스의 숲",
        name_en: "ARTEMIS' FOREST",
        myth: "Ἄρτεμις",
        category: "그린 & 우디",
        price: Price::won(345_000),
        tags: &["그린", "우디", "중성", "청량한", "FRESH", "가을"],
        description: "달의 여신이 지키는 신성한 숲의 청량함",
        rating: stars(5),
    },
    Product {
        id: ProductId::new(4),
        name: "제우스의 천상",
        name_en: "ZEUS' OLYMPUS",
        myth: "Ζεύς",
        category: "오리엔탈 & 앰버",
        price: Price::won(420_000),
        tags: &["오리엔탈", "앰버", "남성", "포멀", "겨울"],
        description: "신들의 왕이 지배하는 올림포스의 위엄",
        rating: stars(5),
    },
    Product {
        id: ProductId::new(5),
        name: "헤라의 왕관",
        name_en: "HERA'S CROWN",
        myth: "Ἥρα",
        category: "플로럴 & 파우더리",
        price: Price::won(398_000),
        tags: &["플로럴", "파우더리", "여성", "웨딩", "봄"],
        description: "결혼의 여신이 쓴 왕관처럼 우아한 파우더리 플로럴",
        rating: stars(4),
    },
    Product {
        id: ProductId::new(6),
        name: "포세이돈의 파도",
        name_en: "POSEIDON'S TIDE",
        myth: "Ποσειδῶν",
        category: "아쿠아 & 마린",
        price: Price::won(330_000),
        tags: &["아쿠아", "마린", "남성", "청량한", "FRESH", "여름"],
        description: "바다의 신이 일으킨 파도의 짙은 물빛",
        rating: stars(4),
    },
    Product {
        id: ProductId::new(7),
        name: "헤르메스의 여정",
        name_en: "HERMES' JOURNEY",
        myth: "Ἑρμῆς",
        category: "스파이시 & 레더",
        price: Price::won(310_000),
        tags: &["스파이시", "레더", "남성", "여행", "가을"],
        description: "전령의 신이 지나온 길 위의 향신료와 가죽",
        rating: stars(3),
    },
    Product {
        id: ProductId::new(8),
        name: "아테나의 지혜",
        name_en: "ATHENA'S WISDOM",
        myth: "Ἀθηνᾶ",
        category: "허브 & 시트러스",
        price: Price::won(355_000),
        tags: &["허브", "시트러스", "중성", "오피스", "사계절"],
        description: "지혜의 여신이 사랑한 올리브 잎과 허브의 명료함",
        rating: stars(4),
    },
];
