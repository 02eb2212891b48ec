use std::{future::pending, time::Duration};

use bon::Builder;
use chrono::Local;
use clap::Parser;
use reqwest::Url;
use tokio::{
    select,
    time::{self, MissedTickBehavior, interval, sleep},
};

use crate::{
    api::{
        heartbeat,
        home_assistant::{Bridge, PercentageOverride},
    },
    cli::{home_assistant::HomeAssistantConnectionArgs, pricing::PricingArgs},
    core::{driver, percent::Percent, trigger::next_hourly_trigger},
    prelude::*,
};

#[derive(Parser)]
pub struct HuntArgs {
    /// Switchable entity to control.
    #[clap(long = "device-entity-id", env = "DEVICE_ENTITY_ID")]
    device_entity_id: String,

    /// Entity to publish the target state and the schedule to.
    #[clap(long = "schedule-entity-id", env = "SCHEDULE_ENTITY_ID")]
    schedule_entity_id: String,

    /// How often to check the percentage override for changes.
    #[clap(
        long,
        env = "OVERRIDE_POLLING_INTERVAL",
        default_value = "1min",
        value_parser = parse_polling_interval,
    )]
    override_polling_interval: Duration,

    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    heartbeat_url: Option<Url>,

    #[clap(flatten)]
    pricing: PricingArgs,

    #[clap(flatten)]
    connection: HomeAssistantConnectionArgs,
}

impl HuntArgs {
    pub async fn run(self) -> Result {
        let api = self.connection.try_new_client()?;
        let percent = self.pricing.resolve_percent(&api, true).await;
        let bridge = Bridge::builder()
            .api(api)
            .price_entity_id(self.pricing.price_entity_id.clone())
            .device_entity_id(self.device_entity_id)
            .schedule_entity_id(self.schedule_entity_id)
            .build();
        Hunter::builder()
            .bridge(bridge)
            .heartbeat(heartbeat::Client::new(self.heartbeat_url)?)
            .pricing(self.pricing)
            .percent(percent)
            .override_polling_interval(self.override_polling_interval)
            .build()
            .run()
            .await
    }
}

/// Evaluates at startup, every hour, and whenever the percentage override changes.
#[derive(Builder)]
struct Hunter {
    bridge: Bridge,
    heartbeat: heartbeat::Client,
    pricing: PricingArgs,

    /// Owned by the loop and passed into each evaluation.
    percent: Percent,

    override_polling_interval: Duration,
}

impl Hunter {
    async fn run(mut self) -> Result {
        let mut override_polling = self.pricing.percentage_entity_id.is_some().then(|| {
            let mut override_polling = interval(self.override_polling_interval);
            override_polling.reset_after(self.override_polling_interval);
            override_polling.set_missed_tick_behavior(MissedTickBehavior::Delay);
            override_polling
        });

        self.evaluate().await;

        loop {
            let now = Local::now();
            let next_trigger = next_hourly_trigger(now)?;
            debug!(%next_trigger, "sleeping…");

            select! {
                () = sleep((next_trigger - now).to_std().unwrap_or_default()) => {
                    self.evaluate().await;
                }
                () = tick(override_polling.as_mut()) => {
                    if self.poll_override().await {
                        self.evaluate().await;
                    }
                }
            }
        }
    }

    /// Failed cycles leave the device and the schedule as they are.
    async fn evaluate(&self) {
        let classifier = self.pricing.classifier(self.percent);
        match driver::evaluate(&self.bridge, classifier).await {
            Ok(evaluation) => {
                debug!(
                    target_state = %evaluation.target,
                    n_slots = evaluation.plan.schedule.len(),
                    transition = ?evaluation.transition,
                    "evaluated"
                );
                self.heartbeat.send().await;
            }
            Err(error) => {
                error!("evaluation failed, skipping until the next trigger: {error:#}");
            }
        }
    }

    /// Returns whether the percentage has changed.
    async fn poll_override(&mut self) -> bool {
        let Some(entity_id) = &self.pricing.percentage_entity_id else {
            return false;
        };
        match self.bridge.api().get_percentage(entity_id).await {
            Ok(PercentageOverride::Set(percent)) if percent != self.percent => {
                info!(from = %self.percent, to = %percent, "percentage updated");
                self.percent = percent;
                true
            }
            Ok(_) => false,
            Err(error) => {
                warn!("failed to poll the percentage override: {error:#}");
                false
            }
        }
    }
}

/// Never completes without an interval.
async fn tick(interval: Option<&mut time::Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending().await,
    }
}

fn parse_polling_interval(value: &str) -> Result<Duration> {
    let interval = Duration::from(value.parse::<humantime::Duration>()?);
    ensure!(!interval.is_zero(), "the polling interval must be positive");
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGS: [&str; 11] = [
        "hunt",
        "--device-entity-id",
        "switch.boiler",
        "--schedule-entity-id",
        "sensor.cheapskate",
        "--price-entity-id",
        "sensor.nordpool",
        "--price-threshold",
        "0",
        "--home-assistant-access-token",
        "token",
    ];

    fn parse(override_polling_interval: &'static str) -> Result<HuntArgs, clap::Error> {
        HuntArgs::try_parse_from(ARGS.into_iter().chain([
            "--home-assistant-api-base-url",
            "http://localhost:8123/api",
            "--override-polling-interval",
            override_polling_interval,
        ]))
    }

    #[test]
    fn polling_interval_ok() -> Result {
        assert_eq!(parse("90s")?.override_polling_interval, Duration::from_secs(90));
        Ok(())
    }

    #[test]
    fn zero_polling_interval_err() {
        assert!(parse("0s").is_err());
    }
}
