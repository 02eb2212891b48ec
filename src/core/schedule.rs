use itertools::Itertools;

use crate::core::{interval::Interval, price::PricePoint};

/// Merge the «on» hours into contiguous intervals.
///
/// Hours are sorted by start first. An hour extends the previous interval only when its start
/// is exactly the previous interval's end. Overlapping input is not expected.
#[must_use]
pub fn build_schedule<'a>(slots: impl IntoIterator<Item = &'a PricePoint>) -> Vec<Interval> {
    slots
        .into_iter()
        .map(PricePoint::interval)
        .sorted_by_key(|interval| interval.start)
        .coalesce(|previous, next| {
            if previous.end == next.start {
                Ok(previous.with_end(next.end))
            } else {
                Err((previous, next))
            }
        })
        .collect()
}
