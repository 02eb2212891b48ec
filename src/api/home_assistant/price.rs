use serde::Deserialize;
use serde_with::serde_as;

use crate::{
    api::home_assistant::{Api, State},
    core::{
        error::InvalidInput,
        price::{PricePoint, PriceSeries},
    },
    prelude::*,
};

impl Api {
    #[instrument(skip_all, fields(entity_id = entity_id))]
    pub async fn get_price_series(&self, entity_id: &str) -> Result<PriceSeries> {
        let state = self
            .get_state::<PriceAttributes>(entity_id)
            .await?
            .with_context(|| format!("price sensor `{entity_id}` does not exist"))?;
        let series = PriceSeries::try_from(state)
            .with_context(|| format!("invalid prices from `{entity_id}`"))?;
        info!(
            current = series.current,
            n_today = series.today.len(),
            n_tomorrow = series.tomorrow.len(),
            "fetched prices"
        );
        Ok(series)
    }
}

/// Attributes of a [Nord Pool](https://github.com/custom-components/nordpool) price sensor.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct PriceAttributes {
    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(default)]
    pub raw_today: Vec<PricePoint>,

    #[serde_as(as = "serde_with::DefaultOnNull")]
    #[serde(default)]
    pub raw_tomorrow: Vec<PricePoint>,

    pub currency: Option<String>,
}

impl TryFrom<State<PriceAttributes>> for PriceSeries {
    type Error = InvalidInput;

    fn try_from(state: State<PriceAttributes>) -> Result<Self, Self::Error> {
        let current = state
            .state
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidInput::UnparsablePrice { value: state.state.clone() })?;
        let series = Self::builder()
            .current(current)
            .today(state.attributes.raw_today)
            .tomorrow(state.attributes.raw_tomorrow)
            .maybe_currency(state.attributes.currency)
            .build();
        series.validate()?;
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, Local};

    use super::*;

    // language=JSON
    const RESPONSE: &str = r#"
        {
            "entity_id": "sensor.nordpool_kwh_nl_eur",
            "state": "0.213",
            "attributes": {
                "current_price": 0.213,
                "unit": "kWh",
                "currency": "EUR",
                "raw_today": [
                    {"start": "2025-10-05T22:00:00+02:00", "end": "2025-10-05T23:00:00+02:00", "value": 0.187},
                    {"start": "2025-10-05T23:00:00+02:00", "end": "2025-10-06T00:00:00+02:00", "value": 0.164}
                ],
                "raw_tomorrow": [
                    {"start": "2025-10-06T00:00:00+02:00", "end": "2025-10-06T01:00:00+02:00", "value": 0.151}
                ],
                "tomorrow_valid": true,
                "friendly_name": "Nord Pool"
            }
        }
    "#;

    #[test]
    fn deserialize_ok() -> Result {
        let state = serde_json::from_str::<State<PriceAttributes>>(RESPONSE)?;
        let series = PriceSeries::try_from(state)?;
        assert_abs_diff_eq!(series.current, 0.213);
        assert_eq!(series.today.len(), 2);
        assert_eq!(series.tomorrow.len(), 1);
        assert_eq!(series.currency.as_deref(), Some("EUR"));
        assert_eq!(series.today[1].end, series.tomorrow[0].start);
        assert_eq!(
            series.tomorrow[0].start,
            DateTime::parse_from_rfc3339("2025-10-05T22:00:00Z")?.with_timezone(&Local)
        );
        Ok(())
    }

    #[test]
    fn missing_tomorrow_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "sensor.nordpool_kwh_nl_eur",
                "state": "0.213",
                "attributes": {
                    "raw_today": [
                        {"start": "2025-10-05T22:00:00+02:00", "end": "2025-10-05T23:00:00+02:00", "value": 0.187}
                    ],
                    "raw_tomorrow": null
                }
            }
        "#;
        let series = PriceSeries::try_from(serde_json::from_str::<State<PriceAttributes>>(RESPONSE)?)?;
        assert_eq!(series.values(), [0.187]);
        assert!(series.currency.is_none());
        Ok(())
    }

    #[test]
    fn unavailable_state_err() -> Result {
        let mut state = serde_json::from_str::<State<PriceAttributes>>(RESPONSE)?;
        state.state = "unavailable".to_string();
        assert_eq!(
            PriceSeries::try_from(state).unwrap_err(),
            InvalidInput::UnparsablePrice { value: "unavailable".to_string() },
        );
        Ok(())
    }
}
