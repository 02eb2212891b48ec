pub mod classifier;
pub mod driver;
pub mod error;
pub mod host;
pub mod interval;
pub mod percent;
pub mod plan;
pub mod price;
pub mod schedule;
pub mod switch;
pub mod trigger;
