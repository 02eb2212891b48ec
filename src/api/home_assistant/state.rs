use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;

/// Entity state as returned by `GET /api/states/<entity_id>`.
#[must_use]
#[derive(Clone, Debug, Deserialize)]
pub struct State<A> {
    pub entity_id: String,

    /// Always a string, even for numeric sensors.
    pub state: String,

    pub attributes: A,
}

impl<A> State<A> {
    /// Home Assistant reports these when the integration has not provided a value.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self.state.as_str(), "unknown" | "unavailable" | "")
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeviceAttributes {
    pub friendly_name: Option<String>,
}

/// Body of `POST /api/states/<entity_id>`.
#[derive(Serialize)]
pub struct NewState<S, A> {
    pub state: S,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<A>,
}

#[derive(Serialize)]
pub struct ScheduleAttributes<'a> {
    pub schedule: &'a [Interval],
}
