use itertools::Itertools;

use crate::{
    core::{
        classifier::{Classifier, Decision, Ranking},
        interval::Interval,
        price::{PricePoint, PriceSeries},
        schedule::build_schedule,
    },
    prelude::*,
};

/// Known hour with its label.
#[derive(Copy, Clone, Debug)]
pub struct Hour {
    pub point: PricePoint,
    pub rank_fraction: f64,
    pub decision: Decision,
}

/// Decision for now along with the labels and the schedule for every known hour.
#[must_use]
#[derive(Clone, Debug)]
pub struct Plan {
    pub decision: Decision,
    pub hours: Vec<Hour>,
    pub schedule: Vec<Interval>,
}

impl Plan {
    pub fn try_new(classifier: Classifier, prices: &PriceSeries) -> Result<Self> {
        prices.validate()?;
        let ranking = Ranking::try_new(prices.values())?;
        let decision = classifier.classify_ranked(prices.current, &ranking);
        let hours = prices
            .points()
            .map(|point| Hour {
                point: *point,
                rank_fraction: ranking.rank_fraction(point.value),
                decision: classifier.classify_ranked(point.value, &ranking),
            })
            .collect_vec();
        let schedule =
            build_schedule(hours.iter().filter(|hour| hour.decision.is_on).map(|hour| &hour.point));
        Ok(Self { decision, hours, schedule })
    }
}
