//! Dynamic fee tiers.
//!
//! A payment amount maps to a fee rate through an ordered table of
//! half-open ranges `[min, max)`; the last tier is unbounded so every
//! non-negative amount matches exactly one tier. The table is validated once
//! at startup and immutable afterwards, so quoting is safe from any number
//! of concurrent handlers.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{AppError, AppResult};

/// Minor-unit precision of fiat-pegged stablecoins.
const MINOR_UNIT_DECIMALS: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeTier {
    /// Inclusive lower bound, in payment-currency units.
    pub min_amount: Decimal,
    /// Exclusive upper bound; `None` marks the unbounded last tier.
    pub max_amount: Option<Decimal>,
    /// Percentage, e.g. `0.75` for 0.75%.
    pub fee_rate: Decimal,
    pub label: String,
}

impl FeeTier {
    fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && self.max_amount.map_or(true, |max| amount < max)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("fee schedule must contain at least one tier")]
    Empty,

    #[error("the first tier must start at zero")]
    NonZeroStart,

    #[error("tier {0} has max_amount <= min_amount")]
    EmptyRange(usize),

    #[error("tier {0} is unbounded but is not the last tier")]
    UnboundedInterior(usize),

    #[error("the last tier must be unbounded")]
    BoundedTail,

    #[error("tier {0} does not start where its predecessor ends")]
    Gap(usize),

    #[error("fee rate increases at tier {0}")]
    RateIncrease(usize),
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeQuote {
    pub amount: Decimal,
    pub fee_rate: Decimal,
    pub fee_amount: Decimal,
    pub total: Decimal,
    pub tier_label: String,
}

#[derive(Debug, Clone)]
pub struct FeeSchedule {
    tiers: Vec<FeeTier>,
}

impl FeeSchedule {
    /// Validate and seal a tier table: contiguous, non-overlapping, sorted
    /// ascending, unbounded tail, fee rate monotonically non-increasing.
    pub fn new(tiers: Vec<FeeTier>) -> Result<Self, ScheduleError> {
        let last = tiers.len().checked_sub(1).ok_or(ScheduleError::Empty)?;

        if tiers[0].min_amount != Decimal::ZERO {
            return Err(ScheduleError::NonZeroStart);
        }

        for (i, tier) in tiers.iter().enumerate() {
            match tier.max_amount {
                Some(max) if max <= tier.min_amount => return Err(ScheduleError::EmptyRange(i)),
                Some(max) => {
                    if i == last {
                        return Err(ScheduleError::BoundedTail);
                    }
                    if tiers[i + 1].min_amount != max {
                        return Err(ScheduleError::Gap(i + 1));
                    }
                    if tiers[i + 1].fee_rate > tier.fee_rate {
                        return Err(ScheduleError::RateIncrease(i + 1));
                    }
                }
                None if i != last => return Err(ScheduleError::UnboundedInterior(i)),
                None => {}
            }
        }

        Ok(Self { tiers })
    }

    /// The production tier table.
    pub fn standard() -> Result<Self, ScheduleError> {
        Self::new(vec![
            tier(dec!(0), Some(dec!(100)), dec!(1.0), "Tier 1"),
            tier(dec!(100), Some(dec!(500)), dec!(0.75), "Tier 2"),
            tier(dec!(500), Some(dec!(2000)), dec!(0.5), "Tier 3"),
            tier(dec!(2000), Some(dec!(5000)), dec!(0.3), "Tier 4"),
            tier(dec!(5000), None, dec!(0.2), "Tier 5"),
        ])
    }

    /// Quote the fee for `amount`. Exactly one tier matches any non-negative
    /// amount; a boundary value belongs to the upper tier. The fee is rounded
    /// half-up to minor-unit precision.
    pub fn quote(&self, amount: Decimal) -> AppResult<FeeQuote> {
        if amount.is_sign_negative() {
            return Err(AppError::Validation("amount must be non-negative".to_string()));
        }

        let matched = self
            .tiers
            .iter()
            .find(|t| t.contains(amount))
            // the validated table is total over [0, inf)
            .ok_or_else(|| AppError::Internal("no fee tier matched".to_string()))?;

        let mut fee_amount = (amount * matched.fee_rate / dec!(100))
            .round_dp_with_strategy(MINOR_UNIT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        // fixed minor-unit scale so "0.5" presents as "0.50"
        fee_amount.rescale(MINOR_UNIT_DECIMALS);

        Ok(FeeQuote {
            amount,
            fee_rate: matched.fee_rate,
            fee_amount,
            total: amount + fee_amount,
            tier_label: matched.label.clone(),
        })
    }

    pub fn tiers(&self) -> &[FeeTier] {
        &self.tiers
    }
}

fn tier(min: Decimal, max: Option<Decimal>, rate: Decimal, label: &str) -> FeeTier {
    FeeTier {
        min_amount: min,
        max_amount: max,
        fee_rate: rate,
        label: label.to_string(),
    }
}
