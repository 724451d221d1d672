//! Price in whole Korean won.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A catalog price in whole won (KRW has no minor unit).
///
/// Displays with the won sign and thousands separators:
///
/// ```
/// use aion_core::Price;
///
/// assert_eq!(Price::won(385_000).to_string(), "₩385,000");
/// assert_eq!(Price::won(900).to_string(), "₩900");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Create a price from a whole-won amount.
    #[must_use]
    pub const fn won(amount: u32) -> Self {
        Self(amount)
    }

    /// The amount in whole won.
    #[must_use]
    pub const fn amount(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "₩{grouped}")
    }
}
