use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use snafu::prelude::*;

/// A strictly positive integer, used for round counts and durations in
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Positive(u64);

impl Positive {
    /// Try to create a [`Positive`] from a u64 integer.
    ///
    /// # Errors
    ///
    /// This function will return an error if the integer is zero.
    pub fn try_new(value: u64) -> Result<Self, TryNewPositiveError> {
        ensure!(value > 0, ZeroSnafu);
        Ok(Self(value))
    }

    /// Returns the inner value of this [`Positive`].
    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns the inner value as a signed integer, saturating at
    /// [`i64::MAX`].
    pub fn signed(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl TryFrom<u64> for Positive {
    type Error = TryNewPositiveError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl Display for Positive {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// An error type of creating a [`Positive`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewPositiveError {
    #[snafu(display("Value must be greater than zero"))]
    #[non_exhaustive]
    Zero,
}
