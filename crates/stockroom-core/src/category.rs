//! Product category labels.
//!
//! Every product carries exactly one label from a fixed, closed set. The
//! wire and storage representation is the upper-case name (`ELECTRONICS`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryLabel {
    Electronics,
    Clothing,
    Food,
    Books,
    Sports,
    Home,
    Other,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 7] = [
        CategoryLabel::Electronics,
        CategoryLabel::Clothing,
        CategoryLabel::Food,
        CategoryLabel::Books,
        CategoryLabel::Sports,
        CategoryLabel::Home,
        CategoryLabel::Other,
    ];

    /// Upper-case name used on the wire and in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            CategoryLabel::Electronics => "ELECTRONICS",
            CategoryLabel::Clothing => "CLOTHING",
            CategoryLabel::Food => "FOOD",
            CategoryLabel::Books => "BOOKS",
            CategoryLabel::Sports => "SPORTS",
            CategoryLabel::Home => "HOME",
            CategoryLabel::Other => "OTHER",
        }
    }

    /// Human-readable name for UIs.
    pub const fn display_name(self) -> &'static str {
        match self {
            CategoryLabel::Electronics => "Electronics",
            CategoryLabel::Clothing => "Clothing",
            CategoryLabel::Food => "Food",
            CategoryLabel::Books => "Books",
            CategoryLabel::Sports => "Sports",
            CategoryLabel::Home => "Home",
            CategoryLabel::Other => "Other",
        }
    }

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, UnknownCategory> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory {
                input: value.to_string(),
            })
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory {
    pub input: String,
}

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid = CategoryLabel::ALL
            .iter()
            .map(|label| label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Invalid category: {}. Valid categories are: {}",
            self.input, valid
        )
    }
}

impl std::error::Error for UnknownCategory {}
