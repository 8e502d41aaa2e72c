//! Companion count type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Companions`] count.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionsError {
    /// The count is negative.
    #[error("companion count cannot be negative (got {0})")]
    Negative(i32),
    /// The count exceeds the per-checkin limit.
    #[error("companion count must be at most {max} (got {got})")]
    TooMany {
        /// Maximum allowed companions per checkin.
        max: i32,
        /// The rejected value.
        got: i32,
    },
}

/// Number of additional guests accompanying a checkin.
///
/// Stored as an `i32` to match the store column, but validated to the range
/// `0..=20` at the boundary. Deserialization goes through the same check via
/// `#[serde(try_from = "i32")]`, so a negative count in a request body fails
/// before it reaches any flow logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Companions(i32);

impl Companions {
    /// Maximum companions a single checkin may bring.
    pub const MAX: i32 = 20;

    /// No companions - the RSVP form default.
    pub const ZERO: Self = Self(0);

    /// Create a validated companion count.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is negative or greater than [`Self::MAX`].
    pub const fn new(count: i32) -> Result<Self, CompanionsError> {
        if count < 0 {
            return Err(CompanionsError::Negative(count));
        }
        if count > Self::MAX {
            return Err(CompanionsError::TooMany {
                max: Self::MAX,
                got: count,
            });
        }
        Ok(Self(count))
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl Default for Companions {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i32> for Companions {
    type Error = CompanionsError;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Companions> for i32 {
    fn from(count: Companions) -> Self {
        count.0
    }
}

impl fmt::Display for Companions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
