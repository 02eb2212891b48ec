use clap::Parser;

use crate::{
    api::home_assistant::{self, PercentageOverride},
    core::{classifier::Classifier, percent::Percent},
    prelude::*,
};

#[derive(Parser)]
pub struct PricingArgs {
    /// Electricity price sensor with `raw_today` and `raw_tomorrow` attributes.
    #[clap(long = "price-entity-id", env = "PRICE_ENTITY_ID")]
    pub price_entity_id: String,

    /// Price at or below which the device is always on.
    #[clap(long = "price-threshold", env = "PRICE_THRESHOLD", allow_negative_numbers = true)]
    pub price_threshold: f64,

    /// Share of the cheapest known hours when the device is on.
    #[clap(long = "percentage", env = "PERCENTAGE", default_value = "50")]
    pub percent: Percent,

    /// Numeric input which overrides `--percentage` when it has a value.
    #[clap(long = "percentage-entity-id", env = "PERCENTAGE_ENTITY_ID")]
    pub percentage_entity_id: Option<String>,
}

impl PricingArgs {
    pub fn classifier(&self, percent: Percent) -> Classifier {
        Classifier::builder().percent(percent).price_threshold(self.price_threshold).build()
    }

    /// Current percentage: the override if it has a value, or the configured one.
    ///
    /// A missing override entity gets created with the configured percentage.
    #[instrument(skip_all)]
    pub async fn resolve_percent(&self, api: &home_assistant::Api, seed: bool) -> Percent {
        let Some(entity_id) = &self.percentage_entity_id else {
            return self.percent;
        };
        match api.get_percentage(entity_id).await {
            Ok(PercentageOverride::Set(percent)) => {
                info!(%percent, "using the percentage override");
                percent
            }
            Ok(PercentageOverride::Missing) => {
                if seed && let Err(error) = api.seed_percentage(entity_id, self.percent).await {
                    warn!("failed to seed the percentage override: {error:#}");
                }
                self.percent
            }
            Ok(PercentageOverride::Unset) => {
                warn!("the percentage override has no usable value, using {}", self.percent);
                self.percent
            }
            Err(error) => {
                warn!("failed to read the percentage override, using {}: {error:#}", self.percent);
                self.percent
            }
        }
    }
}
