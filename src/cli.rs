mod home_assistant;
mod hunt;
mod pricing;
mod scout;

use clap::{Parser, Subcommand};

pub use self::{hunt::HuntArgs, scout::ScoutArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: switch the device every hour and publish the schedule.
    #[clap(name = "hunt")]
    Hunt(Box<HuntArgs>),

    /// Evaluate once and print the plan without touching any entity.
    #[clap(name = "scout")]
    Scout(Box<ScoutArgs>),
}
