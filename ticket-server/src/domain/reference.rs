//! Booking reference (PNR) type.

use std::fmt;

/// Error returned when parsing an empty booking reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid reference code: {reason}")]
pub struct InvalidReferenceCode {
    reason: &'static str,
}

/// A non-empty booking reference (PNR).
///
/// Surrounding whitespace is stripped on parse. Any `ReferenceCode` value
/// is guaranteed to contain at least one non-whitespace character.
///
/// # Examples
///
/// ```
/// use ticket_server::domain::ReferenceCode;
///
/// let pnr = ReferenceCode::parse("  PNR1234 ").unwrap();
/// assert_eq!(pnr.as_str(), "PNR1234");
///
/// assert!(ReferenceCode::parse("").is_err());
/// assert!(ReferenceCode::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Parse a reference code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidReferenceCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidReferenceCode {
                reason: "must not be empty",
            });
        }

        Ok(ReferenceCode(trimmed.to_string()))
    }

    /// Returns the reference code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceCode({})", self.0)
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let code = ReferenceCode::parse("\tAB12CD\n").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
        assert_eq!(code.to_string(), "AB12CD");
    }

    #[test]
    fn reject_blank() {
        let err = ReferenceCode::parse(" \t ").unwrap_err();
        assert_eq!(err.to_string(), "invalid reference code: must not be empty");
    }

    #[test]
    fn case_is_preserved() {
        assert_ne!(
            ReferenceCode::parse("abc").unwrap(),
            ReferenceCode::parse("ABC").unwrap()
        );
    }
}
