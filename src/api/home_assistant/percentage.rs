use serde::de::IgnoredAny;

use crate::{
    api::home_assistant::{Api, NewState, State},
    core::percent::Percent,
    prelude::*,
};

/// What the percentage override entity currently holds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PercentageOverride {
    /// The entity does not exist yet.
    Missing,

    /// The entity exists but its state is not a usable percentage.
    Unset,

    Set(Percent),
}

impl From<Option<State<IgnoredAny>>> for PercentageOverride {
    fn from(state: Option<State<IgnoredAny>>) -> Self {
        let Some(state) = state else {
            return Self::Missing;
        };
        if state.is_unknown() {
            debug!(state = %state.state, "percentage override has no value");
            return Self::Unset;
        }
        match state.state.parse::<Percent>() {
            Ok(percent) => Self::Set(percent),
            Err(error) => {
                warn!("ignoring the percentage override: {error:#}");
                Self::Unset
            }
        }
    }
}

impl Api {
    #[instrument(skip_all, level = Level::DEBUG, fields(entity_id = entity_id))]
    pub async fn get_percentage(&self, entity_id: &str) -> Result<PercentageOverride> {
        Ok(self.get_state::<IgnoredAny>(entity_id).await?.into())
    }

    /// Create the override entity with the configured percentage.
    #[instrument(skip_all, fields(entity_id = entity_id, percent = %percent))]
    pub async fn seed_percentage(&self, entity_id: &str, percent: Percent) -> Result {
        info!("seeding the percentage override…");
        self.set_state(entity_id, &NewState::<_, ()> { state: percent.get(), attributes: None })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(response: &str) -> Result<PercentageOverride> {
        Ok(Some(serde_json::from_str::<State<IgnoredAny>>(response)?).into())
    }

    #[test]
    fn missing_ok() {
        assert_eq!(PercentageOverride::from(None), PercentageOverride::Missing);
    }

    #[test]
    fn set_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "input_number.cheapskate_percentage",
                "state": "30.0",
                "attributes": {"min": 0, "max": 100}
            }
        "#;
        assert_eq!(parse(RESPONSE)?, PercentageOverride::Set(Percent::try_new(30)?));
        Ok(())
    }

    #[test]
    fn unavailable_is_unset() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "input_number.cheapskate_percentage",
                "state": "unavailable",
                "attributes": {}
            }
        "#;
        assert_eq!(parse(RESPONSE)?, PercentageOverride::Unset);
        Ok(())
    }

    #[test]
    fn out_of_range_is_unset() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "entity_id": "input_number.cheapskate_percentage",
                "state": "150",
                "attributes": {}
            }
        "#;
        assert_eq!(parse(RESPONSE)?, PercentageOverride::Unset);
        Ok(())
    }
}
