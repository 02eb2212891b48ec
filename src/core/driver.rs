use crate::{
    core::{classifier::Classifier, host::Host, plan::Plan, switch::SwitchState},
    prelude::*,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    /// The device has been commanded into the target state.
    Switched { from: Option<SwitchState>, to: SwitchState },

    Unchanged(SwitchState),
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub plan: Plan,
    pub target: SwitchState,
    pub transition: Transition,
}

/// Run one evaluation cycle.
///
/// The schedule is published on every successful cycle, the device is commanded only when its
/// last known state differs from the target.
#[instrument(skip_all, fields(percent = %classifier.percent))]
pub async fn evaluate(host: &impl Host, classifier: Classifier) -> Result<Evaluation> {
    let prices = host.get_price_series().await.context("failed to fetch the prices")?;
    let plan = Plan::try_new(classifier, &prices)?;
    let target = SwitchState::from(plan.decision.is_on);

    debug!(n_hours = plan.hours.len(), schedule = ?plan.schedule, "planned");
    host.publish_schedule(target, &plan.schedule).await.context("failed to publish the schedule")?;

    let device = host.get_device().await.context("failed to fetch the device state")?;
    let message = format!(
        "electricity price is {} {} which is {}",
        prices.current,
        prices.unit(),
        classifier.explain(plan.decision),
    );
    let transition = if device.state == Some(target) {
        debug!("{message}, {} is already {target}", device.friendly_name);
        Transition::Unchanged(target)
    } else {
        info!("{message}, turning {} {target}", device.friendly_name);
        host.set_device_state(target)
            .await
            .with_context(|| format!("failed to turn {} {target}", device.friendly_name))?;
        Transition::Switched { from: device.state, to: target }
    };

    Ok(Evaluation { plan, target, transition })
}
