use chrono::{DateTime, DurationRound, Local, TimeDelta};

use crate::prelude::*;

/// Minute past every hour when the prices are re-evaluated.
const MINUTE: TimeDelta = TimeDelta::minutes(1);

/// Next `HH:01:00` strictly after `now`.
pub fn next_hourly_trigger(now: DateTime<Local>) -> Result<DateTime<Local>> {
    let trigger = now.duration_trunc(TimeDelta::hours(1))? + MINUTE;
    Ok(if trigger > now { trigger } else { trigger + TimeDelta::hours(1) })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, 5, hour, minute, second).unwrap()
    }

    #[test]
    fn before_trigger_minute() -> Result {
        assert_eq!(next_hourly_trigger(at(13, 0, 30))?, at(13, 1, 0));
        Ok(())
    }

    #[test]
    fn exactly_at_trigger() -> Result {
        assert_eq!(next_hourly_trigger(at(13, 1, 0))?, at(14, 1, 0));
        Ok(())
    }

    #[test]
    fn after_trigger_minute() -> Result {
        assert_eq!(next_hourly_trigger(at(13, 42, 7))?, at(14, 1, 0));
        Ok(())
    }

    #[test]
    fn crosses_midnight() -> Result {
        assert_eq!(
            next_hourly_trigger(at(23, 59, 59))?,
            Local.with_ymd_and_hms(2025, 10, 6, 0, 1, 0).unwrap()
        );
        Ok(())
    }
}
