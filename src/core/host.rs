use async_trait::async_trait;

use crate::{
    core::{
        interval::Interval,
        price::PriceSeries,
        switch::{Device, SwitchState},
    },
    prelude::*,
};

/// Everything an evaluation reads from and writes to the outside world.
#[async_trait]
pub trait Host: Sync {
    async fn get_price_series(&self) -> Result<PriceSeries>;

    async fn get_device(&self) -> Result<Device>;

    async fn set_device_state(&self, state: SwitchState) -> Result;

    /// Replace the published schedule, including the target state.
    async fn publish_schedule(&self, state: SwitchState, schedule: &[Interval]) -> Result;
}
