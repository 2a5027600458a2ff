use serde::Serialize;
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing credit ranges
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ParseCreditsError {
    EmptyInput,
    NoValidCredits,
}

impl Display for ParseCreditsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Empty input string"),
            Self::NoValidCredits => write!(f, "No valid credit value found in input"),
        }
    }
}

impl std::error::Error for ParseCreditsError {}

/// Represents the catalog credit value of a course
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub enum CreditRange {
    /// A fixed number of credits
    Single(f32),
    /// A variable range of credits
    Range(f32, f32),
}

impl CreditRange {
    /// Helper to get the minimum value
    pub fn min_value(&self) -> f32 {
        match self {
            Self::Single(value) => *value,
            Self::Range(min, _) => *min,
        }
    }

    /// Helper to get the maximum value
    pub fn max_value(&self) -> f32 {
        match self {
            Self::Single(value) => *value,
            Self::Range(_, max) => *max,
        }
    }
}

impl PartialOrd for CreditRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Order first by minimum value, then by maximum value if min is equal
        match self.min_value().partial_cmp(&other.min_value()) {
            Some(Ordering::Equal) => self.max_value().partial_cmp(&other.max_value()),
            other => other,
        }
    }
}

impl FromStr for CreditRange {
    type Err = ParseCreditsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCreditsError::EmptyInput);
        }

        // Check if it's a single value
        if let Ok(value) = s.parse::<f32>() {
            return Ok(Self::Single(value));
        }

        // Check if it's a range (e.g., "1-3")
        if let Some((min, max)) = s.split_once('-')
            && let (Ok(min), Ok(max)) = (min.trim().parse::<f32>(), max.trim().parse::<f32>())
        {
            return Ok(Self::Range(min, max));
        }

        Err(ParseCreditsError::NoValidCredits)
    }
}

impl Display for CreditRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Single(value) => {
                // Format as whole number if it's an integer
                if value.fract() == 0.0 {
                    write!(f, "{}", *value as i32)
                } else {
                    write!(f, "{value}")
                }
            }
            Self::Range(min, max) => {
                if min.fract() == 0.0 && max.fract() == 0.0 {
                    write!(f, "{}-{}", *min as i32, *max as i32)
                } else {
                    write!(f, "{min}-{max}")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_parse(input: &str, expected: CreditRange) {
        let result = CreditRange::from_str(input);
        assert!(
            result.is_ok(),
            "Failed to parse '{}': {:?}",
            input,
            result.err()
        );
        assert_eq!(result.unwrap(), expected);
    }

    #[test]
    fn test_parse_single_values() {
        test_parse("3", CreditRange::Single(3.0));
        test_parse("4.5", CreditRange::Single(4.5));
        test_parse(" 0 ", CreditRange::Single(0.0));
    }

    #[test]
    fn test_parse_ranges() {
        test_parse("1-3", CreditRange::Range(1.0, 3.0));
        test_parse("0-12", CreditRange::Range(0.0, 12.0));
        test_parse("1 - 6", CreditRange::Range(1.0, 6.0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            CreditRange::from_str(""),
            Err(ParseCreditsError::EmptyInput)
        );
        assert_eq!(
            CreditRange::from_str("three"),
            Err(ParseCreditsError::NoValidCredits)
        );
        assert_eq!(
            CreditRange::from_str("-"),
            Err(ParseCreditsError::NoValidCredits)
        );
    }

    #[test]
    fn test_ordering() {
        assert!(CreditRange::Single(3.0) < CreditRange::Single(6.0));
        assert!(CreditRange::Range(1.0, 3.0) < CreditRange::Range(2.0, 3.0));
        assert!(CreditRange::Range(1.0, 3.0) < CreditRange::Range(1.0, 6.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(CreditRange::Single(3.0).to_string(), "3");
        assert_eq!(CreditRange::Single(4.5).to_string(), "4.5");
        assert_eq!(CreditRange::Range(1.0, 3.0).to_string(), "1-3");
    }
}
