//! Price conversion and display rounding
//!
//! Lesson prices are defined in GBP and converted with a fixed rate table.
//! Converted amounts are always rounded up: to the next whole unit below 20,
//! otherwise to the next multiple of 5.

use thiserror::Error;
use tracing::warn;

/// Currency every base price is expressed in.
pub const BASE_CURRENCY: &str = "GBP";

/// Converted amounts below this are rounded to whole units, above it to multiples of 5.
pub const WHOLE_UNIT_THRESHOLD: u64 = 20;

/// Conversion factors from GBP, in hundredths (135 means 1 GBP = 1.35 USD).
const RATES: [(&str, u64); 7] = [
    ("USD", 135),
    ("CAD", 185),
    ("AED", 496),
    ("SAR", 500),
    ("QAR", 491),
    ("KWD", 41),
    ("GBP", 100),
];

/// Errors returned by the price calculator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The currency is missing from the rate table
    #[error("No rate found for currency: {0}")]
    UnknownCurrency(String),
}

/// Conversion factor for `currency`, in hundredths.
#[must_use]
pub fn rate_hundredths(currency: &str) -> Option<u64> {
    RATES
        .iter()
        .find(|(code, _)| *code == currency)
        .map(|(_, rate)| *rate)
}

/// Currencies present in the rate table.
pub fn currencies() -> impl Iterator<Item = &'static str> {
    RATES.iter().map(|(code, _)| *code)
}

/// Convert `base_gbp` into `currency` and round it for display.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] when the rate table has no entry
/// for `currency`.
pub fn price(base_gbp: u32, currency: &str) -> Result<u64, PricingError> {
    let Some(rate) = rate_hundredths(currency) else {
        warn!("No rate found for currency: {currency}");
        return Err(PricingError::UnknownCurrency(currency.to_string()));
    };
    Ok(round_for_display(u64::from(base_gbp) * rate))
}

/// Round an amount given in hundredths of a unit, always upwards.
#[must_use]
pub fn round_for_display(hundredths: u64) -> u64 {
    if hundredths < WHOLE_UNIT_THRESHOLD * 100 {
        hundredths.div_ceil(100)
    } else {
        hundredths.div_ceil(500) * 5
    }
}

/// Lesson group sizes with their own base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// One-to-one lesson.
    Individual,
    /// Group of 2-3 students, priced per student.
    SmallGroup,
    /// Group of 4 or more, priced per student.
    LargeGroup,
}

impl Tier {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::Individual, Self::SmallGroup, Self::LargeGroup];

    /// Base price in GBP.
    #[must_use]
    pub const fn base_gbp(self) -> u32 {
        match self {
            Self::Individual => 40,
            Self::SmallGroup => 35,
            Self::LargeGroup => 30,
        }
    }
}

/// Converted prices of all tiers for one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    /// Currency the prices are quoted in.
    pub currency: String,
    /// Individual lesson price.
    pub individual: u64,
    /// Per-student price for a group of 2-3.
    pub small_group: u64,
    /// Per-student price for a group of 4+.
    pub large_group: u64,
}

impl PriceTable {
    /// Price of one tier.
    #[must_use]
    pub const fn get(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Individual => self.individual,
            Tier::SmallGroup => self.small_group,
            Tier::LargeGroup => self.large_group,
        }
    }
}

/// Compute the three tier prices for `currency`.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] when the currency has no rate.
pub fn tier_prices(currency: &str) -> Result<PriceTable, PricingError> {
    Ok(PriceTable {
        currency: currency.to_string(),
        individual: price(Tier::Individual.base_gbp(), currency)?,
        small_group: price(Tier::SmallGroup.base_gbp(), currency)?,
        large_group: price(Tier::LargeGroup.base_gbp(), currency)?,
    })
}
