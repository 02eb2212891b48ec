//! [Home Assistant REST API](https://developers.home-assistant.io/docs/api/rest/) client.

mod bridge;
mod percentage;
mod price;
mod state;

use std::time::Duration;

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};

pub use self::{
    bridge::Bridge,
    percentage::PercentageOverride,
    state::{DeviceAttributes, NewState, ScheduleAttributes, State},
};
use crate::prelude::*;

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn try_new(access_token: &str, base_url: Url) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))?;
        authorization.set_sensitive(true);
        let headers = HeaderMap::from_iter([(AUTHORIZATION, authorization)]);
        let client = ClientBuilder::new()
            .user_agent("cheapskate")
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch the entity state, `None` if the entity does not exist.
    #[instrument(skip_all, level = Level::DEBUG, fields(entity_id = entity_id))]
    pub async fn get_state<A: DeserializeOwned>(
        &self,
        entity_id: &str,
    ) -> Result<Option<State<A>>> {
        let response = self
            .client
            .get(self.url(&["states", entity_id])?)
            .send()
            .await
            .with_context(|| format!("failed to request the `{entity_id}` state"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let state = response
            .error_for_status()
            .with_context(|| format!("failed to get the `{entity_id}` state"))?
            .json::<State<A>>()
            .await
            .with_context(|| format!("failed to deserialize the `{entity_id}` state"))?;
        debug!(state = %state.state, "fetched");
        Ok(Some(state))
    }

    /// Create or fully replace the entity state.
    #[instrument(skip_all, level = Level::DEBUG, fields(entity_id = entity_id))]
    pub async fn set_state<S, A>(&self, entity_id: &str, state: &NewState<S, A>) -> Result
    where
        S: Serialize,
        A: Serialize,
    {
        self.client
            .post(self.url(&["states", entity_id])?)
            .json(state)
            .send()
            .await
            .with_context(|| format!("failed to request setting the `{entity_id}` state"))?
            .error_for_status()
            .with_context(|| format!("failed to set the `{entity_id}` state"))?;
        Ok(())
    }

    /// Call a service targeting a single entity, for example `homeassistant.turn_on`.
    #[instrument(skip_all, fields(domain = domain, service = service, entity_id = entity_id))]
    pub async fn call_service(&self, domain: &str, service: &str, entity_id: &str) -> Result {
        #[derive(Serialize)]
        struct ServiceData<'a> {
            entity_id: &'a str,
        }

        info!("calling…");
        self.client
            .post(self.url(&["services", domain, service])?)
            .json(&ServiceData { entity_id })
            .send()
            .await
            .with_context(|| format!("failed to call `{domain}.{service}`"))?
            .error_for_status()
            .with_context(|| format!("`{domain}.{service}` failed"))?;
        Ok(())
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL: `{}`", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
