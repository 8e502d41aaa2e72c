//! Guest name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`GuestName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GuestNameError {
    /// The input string is empty (or whitespace only).
    #[error("guest name cannot be empty")]
    Empty,
    /// The input string is shorter than the minimum length.
    #[error("guest name must be at least {min} characters")]
    TooShort {
        /// Minimum required length.
        min: usize,
    },
    /// The input string is too long.
    #[error("guest name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A guest's display name as entered on the RSVP form.
///
/// The name is the only identity a guest has - there are no accounts - so
/// parsing enforces the same minimum the RSVP form does, before any store
/// call is made.
///
/// ## Constraints
///
/// - Leading/trailing whitespace is trimmed
/// - Length after trimming: 3-120 characters
///
/// ## Examples
///
/// ```
/// use figclover_core::GuestName;
///
/// assert!(GuestName::parse("Ana Beatriz").is_ok());
/// assert!(GuestName::parse("  Jo\u{e3}o  ").is_ok()); // trimmed
///
/// assert!(GuestName::parse("").is_err());   // empty
/// assert!(GuestName::parse("Jo").is_err()); // below minimum length
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct GuestName(String);

impl GuestName {
    /// Minimum length of a guest name.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a guest name.
    pub const MAX_LENGTH: usize = 120;

    /// Parse a `GuestName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, shorter than 3
    /// characters, or longer than 120 characters.
    pub fn parse(s: &str) -> Result<Self, GuestNameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(GuestNameError::Empty);
        }

        let len = trimmed.chars().count();

        if len < Self::MIN_LENGTH {
            return Err(GuestNameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if len > Self::MAX_LENGTH {
            return Err(GuestNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `GuestName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GuestName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        let name = GuestName::parse("Maria Clara").expect("valid name");
        assert_eq!(name.as_str(), "Maria Clara");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = GuestName::parse("   Rafael   ").expect("valid name");
        assert_eq!(name.as_str(), "Rafael");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(GuestName::parse(""), Err(GuestNameError::Empty));
        assert_eq!(GuestName::parse("   "), Err(GuestNameError::Empty));
    }

    #[test]
    fn rejects_names_below_minimum_length() {
        assert_eq!(
            GuestName::parse("Jo"),
            Err(GuestNameError::TooShort { min: 3 })
        );
        // Whitespace does not count toward the minimum
        assert_eq!(
            GuestName::parse(" Jo "),
            Err(GuestNameError::TooShort { min: 3 })
        );
    }

    #[test]
    fn rejects_names_over_maximum_length() {
        let long = "a".repeat(121);
        assert_eq!(
            GuestName::parse(&long),
            Err(GuestNameError::TooLong { max: 120 })
        );
    }

    #[test]
    fn minimum_length_counts_chars_not_bytes() {
        // Three two-byte characters are still three characters
        assert!(GuestName::parse("\u{e9}\u{e9}\u{e9}").is_ok());
    }
}
