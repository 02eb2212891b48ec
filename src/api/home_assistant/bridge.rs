use async_trait::async_trait;

use crate::{
    api::home_assistant::{Api, DeviceAttributes, NewState, ScheduleAttributes},
    core::{
        host::Host,
        interval::Interval,
        price::PriceSeries,
        switch::{Device, SwitchState},
    },
    prelude::*,
};

/// Entities the controller works with.
#[derive(bon::Builder)]
pub struct Bridge {
    api: Api,

    #[builder(into)]
    price_entity_id: String,

    #[builder(into)]
    device_entity_id: String,

    #[builder(into)]
    schedule_entity_id: String,
}

impl Bridge {
    pub const fn api(&self) -> &Api {
        &self.api
    }
}

#[async_trait]
impl Host for Bridge {
    async fn get_price_series(&self) -> Result<PriceSeries> {
        self.api.get_price_series(&self.price_entity_id).await
    }

    async fn get_device(&self) -> Result<Device> {
        let state = self
            .api
            .get_state::<DeviceAttributes>(&self.device_entity_id)
            .await?
            .with_context(|| format!("device `{}` does not exist", self.device_entity_id))?;
        Ok(Device {
            state: SwitchState::from_state(&state.state),
            friendly_name: state.attributes.friendly_name.unwrap_or(state.entity_id),
        })
    }

    async fn set_device_state(&self, state: SwitchState) -> Result {
        let service = match state {
            SwitchState::On => "turn_on",
            SwitchState::Off => "turn_off",
        };
        self.api.call_service("homeassistant", service, &self.device_entity_id).await
    }

    async fn publish_schedule(&self, state: SwitchState, schedule: &[Interval]) -> Result {
        let new_state = NewState { state, attributes: Some(ScheduleAttributes { schedule }) };
        self.api.set_state(&self.schedule_entity_id, &new_state).await
    }
}
