use clap::Parser;

use crate::{
    cli::{home_assistant::HomeAssistantConnectionArgs, pricing::PricingArgs},
    core::{plan::Plan, switch::SwitchState},
    prelude::*,
    tables::{build_hours_table, build_schedule_table},
};

#[derive(Parser)]
pub struct ScoutArgs {
    #[clap(flatten)]
    pricing: PricingArgs,

    #[clap(flatten)]
    connection: HomeAssistantConnectionArgs,
}

impl ScoutArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = self.connection.try_new_client()?;
        let percent = self.pricing.resolve_percent(&api, false).await;
        let classifier = self.pricing.classifier(percent);
        let prices = api.get_price_series(&self.pricing.price_entity_id).await?;
        let plan = Plan::try_new(classifier, &prices)?;

        println!("{}", build_hours_table(&plan));
        println!("{}", build_schedule_table(&plan.schedule));
        info!(
            state = %SwitchState::from(plan.decision.is_on),
            "electricity price is {} {} which is {}",
            prices.current,
            prices.unit(),
            classifier.explain(plan.decision),
        );
        Ok(())
    }
}
