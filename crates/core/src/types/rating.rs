//! Star rating type.

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside 1-5.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// The rejected value.
        value: u8,
        /// Lowest allowed rating.
        min: u8,
        /// Highest allowed rating.
        max: u8,
    },
}

/// A whole-star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `value` is not within 1-5.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// The number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Filled and empty star glyphs, e.g. `★★★★☆` for 4.
    #[must_use]
    pub fn glyphs(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX - self.0);
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
