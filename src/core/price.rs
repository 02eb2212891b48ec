use std::fmt::{Display, Formatter};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    core::{error::InvalidInput, interval::Interval},
    prelude::*,
};

/// One known hourly price.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub value: f64,
}

impl PricePoint {
    pub const fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Everything known about the prices at the moment of an evaluation.
#[must_use]
#[derive(Clone, Debug, bon::Builder)]
pub struct PriceSeries {
    /// The price right now, as reported by the sensor.
    pub current: f64,

    #[builder(default)]
    pub today: Vec<PricePoint>,

    /// Usually empty until the day-ahead auction results get published.
    #[builder(default)]
    pub tomorrow: Vec<PricePoint>,

    #[builder(into)]
    pub currency: Option<String>,
}

impl PriceSeries {
    /// Today's points followed by tomorrow's.
    pub fn points(&self) -> impl Iterator<Item = &PricePoint> {
        self.today.iter().chain(&self.tomorrow)
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points().map(|point| point.value).collect()
    }

    /// Reject values that cannot be ordered.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        std::iter::once(self.current)
            .chain(self.points().map(|point| point.value))
            .find(|value| !value.is_finite())
            .map_or(Ok(()), |value| Err(InvalidInput::NonFinitePrice { value }))
    }

    pub fn unit(&self) -> Unit<'_> {
        Unit(self.currency.as_deref())
    }
}

/// Price unit for the log messages.
pub struct Unit<'a>(Option<&'a str>);

impl Display for Unit<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(currency) => write!(f, "{currency}/kWh"),
            None => write!(f, "/kWh"),
        }
    }
}
