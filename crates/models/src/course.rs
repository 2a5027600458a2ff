use crate::{course_code::CourseCode, credits::CreditRange};
use serde::Serialize;
use std::collections::BTreeMap;

/// A cataloged course as the matching engine sees it. Immutable once
/// cataloged for a given catalog year.
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub code: CourseCode,
    pub title: String,
    /// Catalog credit value; the credits actually counted for a plan
    /// entry live on the planned course, not here
    pub credits: CreditRange,
    /// Free-form attribute tags grouped by category,
    /// e.g. {"axle": ["HCA", "P"]}
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Course {
    pub fn new(code: CourseCode, title: &str, credits: CreditRange) -> Self {
        Self {
            code,
            title: title.to_string(),
            credits,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute tag under the given category
    pub fn with_attribute(mut self, category: &str, tag: &str) -> Self {
        self.attributes
            .entry(category.to_string())
            .or_default()
            .push(tag.to_string());
        self
    }

    /// True when the course carries the given tag in any category
    pub fn has_attribute(&self, tag: &str) -> bool {
        self.attributes
            .values()
            .flatten()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
