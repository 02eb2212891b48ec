use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use crate::{core::error::InvalidInput, prelude::*};

/// Share of the known hourly prices that counts as «cheap».
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Percent(u32);

impl Percent {
    pub const MAX: Self = Self(100);

    pub fn try_new(value: u32) -> Result<Self, InvalidInput> {
        if value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(InvalidInput::PercentOutOfRange { value })
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self(50)
    }
}

impl FromStr for Percent {
    type Err = Error;

    /// Parse a whole or fractional number, truncating the fraction.
    ///
    /// Home Assistant reports `input_number` states like `40.0`.
    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s.trim().parse().with_context(|| format!("`{s}` is not a number"))?;
        ensure!(
            value.is_finite() && value >= 0.0,
            "percentage `{value}` must be a non-negative number"
        );
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = value.trunc().min(f64::from(u32::MAX)) as u32;
        Ok(Self::try_new(value)?)
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Debug for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
