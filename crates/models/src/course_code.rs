use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing course codes
#[derive(Debug, Clone, PartialEq)]
pub struct ParseCourseCodeError(pub String);

impl Display for ParseCourseCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "invalid course code: {}", self.0)
    }
}

impl std::error::Error for ParseCourseCodeError {}

/// A catalog course identifier: subject prefix plus catalog number,
/// e.g. "CS 1101" or "BSCI 1510L"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode {
    subject: String,
    number: String,
}

impl CourseCode {
    /// Builds a code from its parts, normalizing to uppercase
    pub fn new(subject: &str, number: &str) -> Self {
        Self {
            subject: subject.trim().to_ascii_uppercase(),
            number: number.trim().to_ascii_uppercase(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Numeric portion of the catalog number, ignoring any trailing
    /// letter suffix ("1510L" -> 1510)
    pub fn numeric(&self) -> Option<u32> {
        let digits: String = self
            .number
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();

        digits.parse().ok()
    }

    /// Trailing letter suffix of the catalog number ("1510L" -> "L"),
    /// if any
    pub fn suffix(&self) -> Option<&str> {
        let split = self
            .number
            .find(|c: char| !c.is_ascii_digit())
            .filter(|&idx| idx > 0)?;

        let suffix = &self.number[split..];
        suffix.chars().all(|c| c.is_ascii_alphabetic()).then_some(suffix)
    }
}

impl FromStr for CourseCode {
    type Err = ParseCourseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let subject = parts.next().ok_or_else(|| ParseCourseCodeError(s.to_string()))?;
        let number = parts.next().ok_or_else(|| ParseCourseCodeError(s.to_string()))?;

        // Anything after "SUBJ 1234" is not a course code
        if parts.next().is_some() {
            return Err(ParseCourseCodeError(s.to_string()));
        }

        if !subject.chars().all(|c| c.is_ascii_alphabetic())
            || !number.chars().next().is_some_and(|c| c.is_ascii_digit())
        {
            return Err(ParseCourseCodeError(s.to_string()));
        }

        Ok(Self::new(subject, number))
    }
}

impl Display for CourseCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.subject, self.number)
    }
}

// Course codes travel through JSON as their display form ("CS 1101")
impl Serialize for CourseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CourseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
