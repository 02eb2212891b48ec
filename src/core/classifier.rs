//! «Is this price cheap enough?»

use std::fmt::{Display, Formatter};

use crate::{
    core::{error::InvalidInput, percent::Percent},
    prelude::*,
};

/// Why the device should be on or off.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reason {
    /// The price is at or below the absolute threshold.
    BelowThreshold,

    /// The price ranks within the cheapest configured percentage.
    AmongLowestPercent,

    NotAmongLowestPercent,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decision {
    pub is_on: bool,
    pub reason: Reason,
}

impl Decision {
    const fn new(reason: Reason) -> Self {
        Self { is_on: !matches!(reason, Reason::NotAmongLowestPercent), reason }
    }
}

/// Known prices, sorted once and ranked many times.
#[must_use]
pub struct Ranking(Vec<f64>);

impl Ranking {
    pub fn try_new(mut prices: Vec<f64>) -> Result<Self, InvalidInput> {
        if prices.is_empty() {
            return Err(InvalidInput::EmptyPriceSeries);
        }
        if let Some(value) = prices.iter().copied().find(|value| !value.is_finite()) {
            return Err(InvalidInput::NonFinitePrice { value });
        }
        prices.sort_by(f64::total_cmp);
        Ok(Self(prices))
    }

    /// Number of the known prices that are lower than or equal to the price.
    ///
    /// This is the rightmost insertion point, so equal prices all count as «lower».
    #[must_use]
    pub fn n_lower_or_equal(&self, price: f64) -> usize {
        self.0.partition_point(|known| *known <= price)
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn rank_fraction(&self, price: f64) -> f64 {
        self.n_lower_or_equal(price) as f64 / self.0.len() as f64
    }

    /// Whether the price falls within the cheapest `percent` of the known prices.
    ///
    /// Compared in integers to keep `2 / 5 <= 40%` exact.
    #[must_use]
    pub fn is_among_lowest(&self, price: f64, percent: Percent) -> bool {
        self.n_lower_or_equal(price) * 100 <= percent.get() as usize * self.0.len()
    }
}

/// Threshold and percentage rules combined.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct Classifier {
    pub percent: Percent,

    /// Absolute price at or below which the device is always on.
    pub price_threshold: f64,
}

impl Classifier {
    /// Empty `prices` is an error even when the threshold alone would decide.
    pub fn classify(&self, price: f64, prices: &[f64]) -> Result<Decision, InvalidInput> {
        if !price.is_finite() {
            return Err(InvalidInput::NonFinitePrice { value: price });
        }
        Ok(self.classify_ranked(price, &Ranking::try_new(prices.to_vec())?))
    }

    /// Same as [`Self::classify`], for many prices against the same ranking.
    pub fn classify_ranked(&self, price: f64, ranking: &Ranking) -> Decision {
        if price <= self.price_threshold {
            Decision::new(Reason::BelowThreshold)
        } else if ranking.is_among_lowest(price, self.percent) {
            Decision::new(Reason::AmongLowestPercent)
        } else {
            Decision::new(Reason::NotAmongLowestPercent)
        }
    }

    pub const fn explain(&self, decision: Decision) -> Explanation {
        Explanation { classifier: *self, reason: decision.reason }
    }
}

/// Human-readable reason, as in «… which is lower than threshold (0.05)».
pub struct Explanation {
    classifier: Classifier,
    reason: Reason,
}

impl Display for Explanation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let percent = self.classifier.percent;
        match self.reason {
            Reason::BelowThreshold => {
                write!(f, "lower than threshold ({})", self.classifier.price_threshold)
            }
            Reason::AmongLowestPercent => {
                write!(f, "among the lowest {percent} of the hourly prices")
            }
            Reason::NotAmongLowestPercent => {
                write!(f, "NOT among the lowest {percent} of the hourly prices")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const PRICES: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    fn classifier(percent: u32, price_threshold: f64) -> Classifier {
        Classifier::builder()
            .percent(Percent::try_new(percent).unwrap())
            .price_threshold(price_threshold)
            .build()
    }

    #[test]
    fn among_lowest_at_boundary() -> Result {
        let decision = classifier(40, 0.0).classify(2.0, &PRICES)?;
        assert_eq!(decision, Decision { is_on: true, reason: Reason::AmongLowestPercent });
        Ok(())
    }

    #[test]
    fn not_among_lowest() -> Result {
        let decision = classifier(40, 0.0).classify(4.0, &PRICES)?;
        assert_eq!(decision, Decision { is_on: false, reason: Reason::NotAmongLowestPercent });
        Ok(())
    }

    #[test]
    fn below_threshold_wins_regardless_of_percentage() -> Result {
        for percent in [0, 40, 100] {
            let decision = classifier(percent, 5.0).classify(5.0, &PRICES)?;
            assert_eq!(decision, Decision { is_on: true, reason: Reason::BelowThreshold });
        }
        Ok(())
    }

    #[test]
    fn empty_prices_err_even_below_threshold() {
        assert_eq!(classifier(0, 0.1).classify(0.05, &[]), Err(InvalidInput::EmptyPriceSeries));
    }

    #[test]
    fn non_finite_prices_err() {
        assert!(matches!(
            classifier(50, 0.0).classify(0.3, &[0.1, f64::NAN]),
            Err(InvalidInput::NonFinitePrice { .. })
        ));
    }

    #[test]
    fn non_finite_current_price_err() {
        let classifier = classifier(0, 0.0);
        assert!(matches!(
            classifier.classify(f64::NAN, &PRICES),
            Err(InvalidInput::NonFinitePrice { .. })
        ));
        assert_eq!(
            classifier.classify(f64::NEG_INFINITY, &PRICES),
            Err(InvalidInput::NonFinitePrice { value: f64::NEG_INFINITY })
        );
    }

    #[test]
    fn hundred_percent_is_always_on() -> Result {
        let classifier = classifier(100, f64::NEG_INFINITY);
        for price in [0.5, 1.0, 3.0, 5.0, 100.0] {
            assert!(classifier.classify(price, &PRICES)?.is_on);
        }
        Ok(())
    }

    #[test]
    fn minimum_is_among_lowest() -> Result {
        let prices = [0.31, 0.12, 0.27, 0.12, 0.45, 0.19, 0.22, 0.38, 0.29, 0.33];
        let decision = classifier(20, 0.0).classify(0.12, &prices)?;
        assert_eq!(decision.reason, Reason::AmongLowestPercent);
        Ok(())
    }

    #[test]
    fn zero_percent_only_threshold() -> Result {
        let decision = classifier(0, 0.0).classify(1.0, &PRICES)?;
        assert!(!decision.is_on);
        Ok(())
    }

    #[test]
    fn ties_count_as_lower() -> Result {
        let ranking = Ranking::try_new(vec![3.0, 1.0, 1.0, 2.0])?;
        assert_eq!(ranking.n_lower_or_equal(1.0), 2);
        assert_eq!(ranking.n_lower_or_equal(0.5), 0);
        assert_eq!(ranking.n_lower_or_equal(9.0), 4);
        assert_abs_diff_eq!(ranking.rank_fraction(2.0), 0.75);
        Ok(())
    }

    #[test]
    fn idempotent() -> Result {
        let classifier = classifier(60, 0.5);
        assert_eq!(classifier.classify(3.0, &PRICES)?, classifier.classify(3.0, &PRICES)?);
        Ok(())
    }

    #[test]
    fn explain_ok() -> Result {
        let classifier = classifier(40, 0.0);
        let decision = classifier.classify(4.0, &PRICES)?;
        assert_eq!(
            classifier.explain(decision).to_string(),
            "NOT among the lowest 40% of the hourly prices"
        );
        Ok(())
    }
}
